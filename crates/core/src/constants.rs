use rust_decimal::Decimal;

/// Entity type recorded on audit entries for catalog items
pub const AUDIT_ENTITY_ITEM: &str = "ITEM";

/// Entity type recorded on audit entries for categories
pub const AUDIT_ENTITY_CATEGORY: &str = "CATEGORY";

/// Entity type recorded on audit entries for suppliers
pub const AUDIT_ENTITY_SUPPLIER: &str = "SUPPLIER";

/// Entity type recorded on audit entries for outlets
pub const AUDIT_ENTITY_OUTLET: &str = "OUTLET";

/// Fields ignored when diffing entity snapshots for the audit log
pub const AUDIT_IGNORED_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// Largest quantity accepted on one transaction line
pub const MAX_LINE_QUANTITY: i64 = 1_000_000_000_000;

/// Largest unit price accepted for an item (10^15)
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Entity type recorded on audit entries for user accounts
pub const AUDIT_ENTITY_USER: &str = "USER";
