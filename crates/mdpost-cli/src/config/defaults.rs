use mdpost::engine::config::UniformDensityPolicy;

/// Prefix of the annotated structure's file name when no output is given.
pub const DENSITY_OUTPUT_PREFIX: &str = "new_";

pub struct DefaultsConfig {
    pub on_uniform: UniformDensityPolicy,
    pub trajectory: String,
    pub topology: String,
    pub index: String,
    pub com_output: String,
    pub scale: f64,
    pub reference_frame: usize,
    pub align: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            on_uniform: UniformDensityPolicy::Zero,
            trajectory: "traj.xtc".to_string(),
            topology: "temp.gro".to_string(),
            index: "index.ndx".to_string(),
            com_output: "comlig.pdb".to_string(),
            scale: 10.0,
            reference_frame: 0,
            align: true,
        }
    }
}
