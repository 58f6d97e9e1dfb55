/// Status of a phone or SIM card sitting in inventory
pub const STATUS_IN_STOCK: &str = "In Stock";

/// Status of a phone or SIM card attached to an open assignment
pub const STATUS_IN_USE: &str = "In Use";

/// Status of a newly created or imported worker
pub const WORKER_STATUS_ACTIVE: &str = "Active";

/// Status of an active phone number
pub const PHONE_NUMBER_STATUS_ACTIVE: &str = "Active";

/// Sector used when a worker is created and no sector exists yet
pub const DEFAULT_SECTOR_NAME: &str = "Default Sector";
