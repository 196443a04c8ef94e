/// Endpoints of the external credential service this screen fronts.
#[derive(Clone)]
pub struct Config {
    password_url: String,
}

impl Config {
    pub fn new(password_url: impl Into<String>) -> Self {
        Self {
            password_url: password_url.into(),
        }
    }

    pub fn password_url(&self) -> &str {
        &self.password_url
    }
}
