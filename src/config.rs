#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage_typ: String,
    pub root_dir: String,
    pub public_url: String,
}
