use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// Service listening host
    #[arg(long, env = "TASKBOX_HOST", default_value = "127.0.0.1")]
    pub(crate) host: String,

    /// Service listening port
    #[arg(short, long, env = "TASKBOX_PORT", default_value_t = 8080)]
    pub(crate) port: u16,

    /// Storage backend type
    #[arg(short, long, env = "TASKBOX_STORAGE", default_value = "FILESYSTEM")]
    pub(crate) storage: String,

    /// Blob container root path
    #[arg(long, env = "TASKBOX_ROOTDIR", default_value = "/var/lib/taskbox")]
    pub(crate) root: String,

    /// Public base url file links are built from
    #[arg(long, env = "TASKBOX_PUBLIC_URL", default_value = "http://127.0.0.1:8080")]
    pub(crate) url: String,
}
