//! Container for data to made accessible to all `mongors` commands.
use anyhow::Result;
use slog::Logger;

use crate::endpoint::dedupe;
use crate::endpoint::Endpoint;
use crate::Cli;

/// Container for data to made accessible to all `mongors` commands.
pub struct Globals {
    /// Parsed CLI arguments.
    pub cli: Cli,

    /// Replica set instances, without duplicates and in the order given.
    pub instances: Vec<Endpoint>,

    /// Configured process logger.
    pub logger: Logger,
}

impl Globals {
    /// Initialise `mongors` process [`Globals`].
    pub fn initialise(cli: Cli) -> Result<Self> {
        let logger = crate::logging::configure(&cli.log)?;
        let instances = dedupe(cli.instances.iter().cloned());
        Ok(Globals {
            cli,
            instances,
            logger,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Globals;
    use crate::endpoint::Endpoint;
    use crate::Cli;

    #[test]
    fn instances_are_deduplicated() {
        let cli = Cli::try_parse_from([
            "mongors", "-i", "a", "-i", "a:27017", "-i", "b:27018", "ensure", "rs0",
        ])
        .unwrap();
        let globals = Globals::initialise(cli).unwrap();
        assert_eq!(
            globals.instances,
            vec![Endpoint::new("a", 27017), Endpoint::new("b", 27018)]
        );
        assert_eq!(globals.cli.instances.len(), 3);
    }
}
