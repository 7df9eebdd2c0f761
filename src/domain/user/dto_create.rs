/// Data needed to insert a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub api_key: String,
}
