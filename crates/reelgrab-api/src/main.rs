use reelgrab_core::Config;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let _telemetry = reelgrab_infra::init_telemetry(&config.service_name, config.log_dir.as_deref())?;

    let (state, router) = reelgrab_api::setup::initialize_app(config.clone()).await?;

    reelgrab_api::setup::server::start_server(&config, state, router).await?;

    Ok(())
}
