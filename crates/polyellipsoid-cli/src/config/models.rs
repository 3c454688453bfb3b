use polyellipsoid::assembly::config::SystemConfig;
use polyellipsoid::assembly::density::BoxConstraints;
use polyellipsoid::assembly::lattice::LatticeParams;
use polyellipsoid::assembly::system::PackOptions;

#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyStrategy {
    Pack(PackOptions),
    Stack(LatticeParams),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub system: SystemConfig,
    pub constraints: BoxConstraints,
    pub assembly: AssemblyStrategy,
    pub pretty: bool,
}
