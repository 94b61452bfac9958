use std::collections::HashMap;

use crate::{Result, db::Db};

/// Resolves taxonomy term ids to names in one query. Ids without a translation in `culture`
/// are absent from the result.
pub async fn term_names(db: &Db, ids: &[i64], culture: &str) -> Result<HashMap<i64, String>> {
	if ids.is_empty() {
		return Ok(HashMap::new());
	}

	let rows: Vec<(i64, Option<String>)> = sqlx::query_as(
		"\
SELECT id::bigint, name
FROM term_i18n
WHERE id = ANY($1) AND culture = $2",
	)
	.bind(ids)
	.bind(culture)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().filter_map(|(id, name)| name.map(|name| (id, name))).collect())
}
