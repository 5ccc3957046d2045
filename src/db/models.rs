/// Row type matching the all_prices table. Used by sqlx for typed reads.
#[derive(Debug, sqlx::FromRow)]
pub struct PriceRow {
    pub id: i64,
    pub reference_name: String,
    pub product_name: String,
    pub product_id: String,
    pub url: String,
    pub price: f64,
    pub percentage_drop: i64,
    /// ISO-8601 date string, `YYYY-MM-DD`.
    pub date_scanned: String,
}
