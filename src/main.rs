use anyhow::Result;
use phase_balancer::{balancer::Balancer, config, report, telemetry};
use config::{Config, OutputFormat};
use report::{render_table, PanelReport};
use telemetry::init_tracing;
use tracing::info;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;
    init_tracing(&cfg.logging);

    let mut panel = cfg.panel.build()?;
    info!(
        panel = panel.name(),
        circuits = panel.circuits().len(),
        "balancing panel"
    );

    let mut balancer = Balancer::from_config(&cfg.balancer)?;
    let outcome = balancer.evaluate(panel.circuits())?;
    balancer.apply(&mut panel, outcome.clone());

    match cfg.output.format {
        OutputFormat::Table => print!("{}", render_table(&panel)?),
        OutputFormat::Json => {
            let snapshot = PanelReport::new(&panel, Some(&outcome))?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}
