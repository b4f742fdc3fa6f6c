use crate::config::Config;
use crate::db::queries;
use crate::db::schema::init_schema;
use crate::errors::AppResult;
use crate::utils::table::Table;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let storage = cfg.storage();
    init_schema(&storage)?;

    let stores = queries::all_stores(&storage)?;

    let mut table = Table::new(&["ID", "STORE", "ADDRESS", "CITY", "ST", "ZIP"]);
    for store in &stores {
        table.add_row(vec![
            store.store_id.to_string(),
            store.store_name.clone(),
            store.store_address.clone(),
            store.store_city.clone(),
            store.store_state.clone(),
            store.store_zip.clone(),
        ]);
    }
    print!("{}", table.render());
    println!("{} locations", stores.len());
    Ok(())
}
