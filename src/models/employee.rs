use super::role::Role;

/// One row of the `employee` table.
#[derive(Debug, Clone)]
pub struct Employee {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
}
