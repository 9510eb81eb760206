use anyhow::Result;
use gpop_sim::simulation::Configuration;

use crate::args::CommonArgs;
use crate::export;

/// Print (or write) the default configuration as JSON.
pub fn print_default_config(common: &CommonArgs) -> Result<()> {
    let mut config = Configuration::default();
    if let Some(seed) = common.seed {
        config = config.with_seed(seed);
    }
    let content = config.to_json_pretty()?;
    export::emit(&content, common.output.as_deref())
}
