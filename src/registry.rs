//! Explicit registration of modules at host startup.

use embassy_time::Instant;
use heapless::Vec;

use crate::host::{Host, HostModule};

/// Error returned when registering into a full registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryFull;

/// Fixed-capacity list of modules driven by the host loop
pub struct ModuleRegistry<'a, H: Host, const N: usize> {
    modules: Vec<&'a mut dyn HostModule<H>, N>,
}

impl<'a, H: Host, const N: usize> ModuleRegistry<'a, H, N> {
    pub const fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Add a module; registration order is the setup and tick order
    pub fn register(&mut self, module: &'a mut dyn HostModule<H>) -> Result<(), RegistryFull> {
        self.modules.push(module).map_err(|_| RegistryFull)
    }

    pub fn setup_all(&mut self, host: &mut H) {
        for module in &mut self.modules {
            module.setup(host);
        }
    }

    pub fn tick_all(&mut self, host: &H, now: Instant) {
        for module in &mut self.modules {
            module.tick(host, now);
        }
    }

    /// Find a module by its id
    pub fn get_mut(&mut self, id: u16) -> Option<&mut (dyn HostModule<H> + 'a)> {
        let module = self.modules.iter_mut().find(|module| module.id() == id)?;
        Some(&mut **module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<H: Host, const N: usize> Default for ModuleRegistry<'_, H, N> {
    fn default() -> Self {
        Self::new()
    }
}
