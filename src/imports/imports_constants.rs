/// Logical field names recognized by the worker-onboarding linking step.
/// A mapping that covers the worker name, ICCID and IMEI at once describes a
/// person, a SIM and a device on every row.
pub const FIELD_WORKER_NAME: &str = "full_name";
pub const FIELD_ICCID: &str = "iccid";
pub const FIELD_IMEI: &str = "imei";
pub const FIELD_CARRIER: &str = "carrier";
pub const FIELD_PIN: &str = "pin";
pub const FIELD_PUK: &str = "puk";
pub const FIELD_ASSET_TAG: &str = "asset_tag";
pub const FIELD_SERIAL_NUMBER: &str = "serial_number";
pub const FIELD_MANUFACTURER: &str = "manufacturer";
pub const FIELD_MODEL: &str = "model";
