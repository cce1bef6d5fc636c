use anyhow::Result;
use argh::FromArgs;
use log::info;

use zindex::tables::{MORTON16, MORTON32};

#[derive(Debug, FromArgs)]
#[argh(description = "renders the byte interleave tables as source constants")]
struct Config {
    #[argh(
        option,
        description = "table family to render: 16 (two slots) or 32 (four slots)",
        default = "16"
    )]
    family: u32,
    #[argh(switch, description = "toggle verbose logging", short = 'v')]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

fn main() -> Result<()> {
    let config: Config = argh::from_env();
    init_logging(config.verbose);

    match config.family {
        16 => {
            info!("16-bit family, 2 slots of 256 entries");
            for table in MORTON16.iter() {
                let row: Vec<String> = table.iter().map(|v| format!("{:#06x}", v)).collect();
                println!("{}", row.join(", "));
            }
        }
        32 => {
            info!("32-bit family, 4 slots of 256 entries");
            for table in MORTON32.iter() {
                let row: Vec<String> = table.iter().map(|v| format!("{:#010x}", v)).collect();
                println!("{}", row.join(", "));
            }
        }
        family => anyhow::bail!("unsupported table family: {}", family),
    }
    Ok(())
}
