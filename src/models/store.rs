/// One row of the `store_location` table. Seeded once at first run,
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct StoreLocation {
    pub store_id: i64,
    pub store_name: String,
    pub store_address: String,
    pub store_city: String,
    pub store_state: String,
    pub store_zip: String,
    pub store_contact: String,
}
