use crate::error::Result;
use crate::store::{DataStore, DoctorReport};
use tracing::info;

pub fn run<S: DataStore>(store: &mut S) -> Result<DoctorReport> {
    let report = store.doctor()?;
    if report.is_clean() {
        info!("library is consistent");
    }
    Ok(report)
}
