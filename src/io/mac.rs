//! WCSim macro emission: position files and the tuning descriptor
//!
//! One batch produces a single water-tuning macro plus one position macro
//! per sample point. File names carry the batch ID, the optical-parameter
//! label, the angles, and the point index, so a directory of generated
//! macros is self-describing and two batches never collide.
//!
//! Emission is ordered and fail-fast: the caller stops at the first error,
//! and files already written stay on disk (they are valid on their own and
//! cheap to regenerate).

use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Vector3;
use thiserror::Error;

use crate::geometry::MPMT58_ORIGIN_CM;
use crate::sampling::SamplePoint;

/// Errors from writing macro files.
#[derive(Error, Debug)]
pub enum EmissionError {
    #[error("macro I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the macro files of one batch into its output directory.
pub struct MacWriter {
    out_dir: PathBuf,
    file_id: u32,
    label: String,
}

impl MacWriter {
    /// Create the output directory if needed and a writer for one batch.
    pub fn create(
        out_dir: impl AsRef<Path>,
        file_id: u32,
        label: impl Into<String>,
    ) -> Result<Self, EmissionError> {
        let out_dir = out_dir.as_ref().to_path_buf();
        fs::create_dir_all(&out_dir)?;
        Ok(Self {
            out_dir,
            file_id,
            label: label.into(),
        })
    }

    /// Write the one-per-run water-tuning descriptor.
    pub fn write_tuning_descriptor(
        &self,
        absorption: f64,
        rayleigh: f64,
    ) -> Result<PathBuf, EmissionError> {
        let path = self
            .out_dir
            .join(format!("tuning_f{:03}_{}.mac", self.file_id, self.label));
        let text = format!(
            "# WCSim water tuning for scan batch {id}\n\
             /WCSim/tuning/abwff {absorption}\n\
             /WCSim/tuning/rayff {rayleigh}\n",
            id = self.file_id,
        );
        fs::write(&path, text)?;
        Ok(path)
    }

    /// Write one position macro: a GPS photon source at `position`, aimed
    /// back at the mPMT 58 window.
    pub fn write_position_macro(
        &self,
        index: usize,
        point: SamplePoint,
        position: &Vector3<f64>,
        radius_cm: f64,
        n_events: u32,
    ) -> Result<PathBuf, EmissionError> {
        let stem = format!(
            "wcte_f{:03}_{}_th{:.2}_phi{:.2}_p{:04}",
            self.file_id, self.label, point.theta, point.phi, index
        );
        let path = self.out_dir.join(format!("{stem}.mac"));
        let aim = (MPMT58_ORIGIN_CM - position).normalize();
        let text = format!(
            "# WCTE light-injection scan, batch {id} point {index}\n\
             # R = {radius_cm:.2} cm, theta = {theta:.2} rad, phi = {phi:.2} rad, {label}\n\
             /run/verbose 0\n\
             /tracking/verbose 0\n\
             /hits/verbose 0\n\
             /WCSim/WCgeom nuPRISMBeamTest_16cShort_mPMT\n\
             /WCSim/Construct\n\
             /WCSim/PMTQEMethod Stacking_Only\n\
             /WCSim/SavePi0 false\n\
             /DAQ/Digitizer SKI\n\
             /DAQ/Trigger NDigits\n\
             /DarkRate/SetDetectorElement tank\n\
             /DarkRate/SetDarkMode 1\n\
             /mygen/generator laser\n\
             /gps/particle opticalphoton\n\
             /gps/energy 3.0996 eV\n\
             /gps/pos/type Point\n\
             /gps/pos/centre {x:.2} {y:.2} {z:.2} cm\n\
             /gps/direction {dx:.6} {dy:.6} {dz:.6}\n\
             /WCSimIO/RootFile {stem}.root\n\
             /run/beamOn {n_events}\n",
            id = self.file_id,
            theta = point.theta,
            phi = point.phi,
            label = self.label,
            x = position.x,
            y = position.y,
            z = position.z,
            dx = aim.x,
            dy = aim.y,
            dz = aim.z,
        );
        fs::write(&path, text)?;
        Ok(path)
    }
}
