use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    /// Header the bundled extractor derives identities from.
    #[envconfig(default = "message-id")]
    pub identity_header: String,

    /// Log forwarded messages instead of running the supplied downstream
    /// step, for smoke deployments.
    #[envconfig(default = "false")]
    pub print_processor: bool,

    /// Share sightings through redis instead of a process-local set.
    #[envconfig(default = "false")]
    pub redis_store: bool,

    #[envconfig(default = "redis://127.0.0.1:6379/")]
    pub redis_url: String,

    #[envconfig(default = "idempotent/seen")]
    pub redis_seen_set_key: String,
}
