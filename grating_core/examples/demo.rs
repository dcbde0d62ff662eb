use grating_core::config::ConfigError;
use grating_core::{grating_sequence, logging, save_contact_sheet, GratingConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let params = config.sequence;
    println!(
        "Loaded config: sf={} ori={} vel={} wave={} {}x{} frames={}",
        params.spatial_frequency,
        params.orientation,
        params.velocity,
        params.waveform,
        params.rows,
        params.cols,
        params.frames
    );

    let sequence = grating_sequence(&params)?;
    for (index, frame) in sequence.iter().enumerate() {
        let value = frame[[0, 0]];
        println!(
            "frame {:>2}: offset {:>4} px, top-left {:.3}",
            index,
            sequence.offsets()[index],
            value
        );
    }

    save_contact_sheet(
        &sequence,
        config.render.columns,
        config.render.gutter,
        &config.render.output,
    )?;
    logging::log_sequence(&params, &sequence)?;

    println!("{}", sequence);
    println!("Contact sheet written to {}", config.render.output.display());
    Ok(())
}

fn load_config() -> Result<GratingConfig, ConfigError> {
    GratingConfig::load_from_file("config/gratings.toml").or_else(|err| {
        tracing::warn!("Falling back to default config: {err}");
        Ok(GratingConfig::default())
    })
}
