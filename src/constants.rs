/// File name and code constants shared across the converter and the lookup service.
/// Register file names follow the CBE open data extracts.

// Full load files
pub const ENTERPRISE_FILE: &str = "enterprise.csv";
pub const DENOMINATION_FILE: &str = "denomination.csv";
pub const ESTABLISHMENT_FILE: &str = "establishment.csv";
pub const CONTACT_FILE: &str = "contact.csv";
pub const ACTIVITY_FILE: &str = "activity.csv";
pub const ADDRESS_FILE: &str = "address.csv";
pub const CODE_FILE: &str = "code.csv";

// Differential update files
pub const ENTERPRISE_INSERT_FILE: &str = "enterprise_insert.csv";
pub const DENOMINATION_INSERT_FILE: &str = "denomination_insert.csv";
pub const ESTABLISHMENT_INSERT_FILE: &str = "establishment_insert.csv";
pub const CONTACT_INSERT_FILE: &str = "contact_insert.csv";
pub const ACTIVITY_INSERT_FILE: &str = "activity_insert.csv";
pub const ADDRESS_INSERT_FILE: &str = "address_insert.csv";

pub const ENTERPRISE_DELETE_FILE: &str = "enterprise_delete.csv";
pub const DENOMINATION_DELETE_FILE: &str = "denomination_delete.csv";
pub const ESTABLISHMENT_DELETE_FILE: &str = "establishment_delete.csv";
pub const CONTACT_DELETE_FILE: &str = "contact_delete.csv";
pub const ACTIVITY_DELETE_FILE: &str = "activity_delete.csv";
pub const ADDRESS_DELETE_FILE: &str = "address_delete.csv";

pub const DELETE_SUFFIX: &str = "_delete";
pub const ID_SUFFIX: &str = "_id";

// Output files
pub const FULL_OUTPUT: &str = "cbe.nt";
pub const CODES_OUTPUT: &str = "cbetypes.nt";
pub const UPDATE_OUTPUT: &str = "cbe-upd.nt";

pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Denomination type of the official legal name
pub const LEGAL_NAME_CODE: &str = "001";

/// NACE version of the current activity classification
pub const CURRENT_NACE_VERSION: &str = "2008";
pub const PREVIOUS_NACE_VERSION: &str = "2003";

/// Country names used when the address has no explicit country (Belgian address)
pub const DEFAULT_COUNTRY_NL: &str = "België";
pub const DEFAULT_COUNTRY_FR: &str = "Belgique";

/// Calling code replacing the leading trunk prefix of phone numbers
pub const COUNTRY_CALLING_PREFIX: &str = "+32-";

// Public search page labels (Dutch interface)
pub const LABEL_ENTERPRISE_NUMBER: &str = "Ondernemingsnummer:";
pub const LABEL_ESTABLISHMENT_NUMBER: &str = "Vestigingseenheidsnummer:";
pub const LABEL_NAME: &str = "Naam:";
pub const LABEL_ABBREVIATION: &str = "Afkorting:";
pub const LABEL_EMAIL: &str = "E-mail:";
pub const LABEL_WEBSITE: &str = "Webadres:";
pub const LABEL_VAT_ACTIVITY: &str = "BTW 2008";
pub const LABEL_NSSO_ACTIVITY: &str = "RSZ 2008";

// Language markers following a name on the public search page
pub const MARKER_DUTCH: &str = "Nederlands";
pub const MARKER_FRENCH: &str = "Frans";
pub const MARKER_GERMAN: &str = "Duits";
pub const MARKER_ENGLISH: &str = "Engels";
