pub mod medicine;

pub use medicine::{MedicineDetail, MedicineKind, MedicineRecord, MedicineSummary, ScanResponse};
