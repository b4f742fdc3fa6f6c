/// One row of the `users` table: the credential record tied to an employee.
/// The password hash is an opaque self-describing string, see auth::password.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub email: String,
    pub password_hash: String,
    pub employee_id: i64,
}
