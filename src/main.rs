use ayw_site::{config::get_or_init_config, App, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        ayw_site::init_production_tracing()
    }
    #[cfg(debug_assertions)]
    {
        ayw_site::init_dbg_tracing();
    }

    let app = App::build_from_config(get_or_init_config().clone()).await?;
    ayw_site::app::serve(app).await?;

    Ok(())
}
