use crate::{Error, Result, db::Db};

#[derive(Clone, Debug, Eq, PartialEq, sqlx::FromRow)]
pub struct RepositoryName {
	pub id: i64,
	pub name: String,
	pub slug: String,
}

/// Repositories whose authorized name starts with `prefix`, ordered by name.
pub async fn name_prefix(
	db: &Db,
	prefix: &str,
	culture: &str,
	limit: u32,
) -> Result<Vec<RepositoryName>> {
	if limit == 0 {
		return Err(Error::InvalidArgument("limit must be greater than zero.".to_string()));
	}

	let pattern = format!("{}%", escape_like(prefix));
	let rows = sqlx::query_as::<_, RepositoryName>(
		"\
SELECT
	repository.id::bigint AS id,
	actor_i18n.authorized_form_of_name AS name,
	slug.slug AS slug
FROM repository
JOIN actor_i18n ON actor_i18n.id = repository.id
JOIN slug ON slug.object_id = repository.id
WHERE actor_i18n.culture = $1
	AND actor_i18n.authorized_form_of_name ILIKE $2
ORDER BY actor_i18n.authorized_form_of_name
LIMIT $3",
	)
	.bind(culture)
	.bind(pattern)
	.bind(i64::from(limit))
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

fn escape_like(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}
