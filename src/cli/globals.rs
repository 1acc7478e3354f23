use crate::{
    config::{GatewayConfig, ManagerConfig},
    view::OutputFormat,
};

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub gateway: GatewayConfig,
    pub manager: ManagerConfig,
    pub output: OutputFormat,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(gateway: GatewayConfig) -> Self {
        Self {
            gateway,
            manager: ManagerConfig::default(),
            output: OutputFormat::default(),
        }
    }

    pub fn set_output(&mut self, output: OutputFormat) {
        self.output = output;
    }
}
