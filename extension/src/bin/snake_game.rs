use infoag_extension::{
    config::Config,
    handlers::{start_snake_game, FilePanelHost},
    init_tracing,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load()?;
    let host = FilePanelHost::new(config.panel_output_dir);
    let panel = start_snake_game(&host)?;
    println!("{}", host.path_for(&panel).display());

    Ok(())
}
