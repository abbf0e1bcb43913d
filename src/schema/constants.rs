/// Container format version - follows semantic versioning
pub const CFDATASET_FORMAT_VERSION: &str = "1.0.0";

/// File extension for single-file dataset containers
pub const CFDATASET_EXTENSION: &str = "cfz";

/// MIME type stored as the first (uncompressed) entry of every container
pub const CFDATASET_MIMETYPE: &str = "application/vnd.cfdataset+zip";

/// ZIP entry holding the JSON header (dimensions, attributes, variable descriptors)
pub const HEADER_ENTRY: &str = "header.json";

/// ZIP directory holding one Parquet payload per variable
pub const VARIABLES_DIR: &str = "variables";

/// Name of the single column in every variable payload
pub const VALUES_COLUMN: &str = "values";

/// Parquet footer key carrying the variable name of a payload
pub const KEY_VARIABLE_NAME: &str = "cfdataset:variable";

/// Parquet footer key carrying the JSON-encoded shape of a payload
pub const KEY_VARIABLE_SHAPE: &str = "cfdataset:shape";

// ---------------------------------------------------------------------------
// Conventions
// ---------------------------------------------------------------------------

/// Metadata convention the datasets adhere to
pub const CONVENTIONS: &str = "CF-1.8";

/// Institution attribute written into every dataset
pub const INSTITUTION: &str = "Helmholtz-Zentrum Hereon, Institute of Coastal Systems, Germany";

/// Format of the `creation_date` global attribute (UTC, no offset)
pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ---------------------------------------------------------------------------
// Global attribute names
// ---------------------------------------------------------------------------

/// Global attribute: metadata convention
pub const ATTR_CONVENTIONS: &str = "conventions";

/// Global attribute: producing institution
pub const ATTR_INSTITUTION: &str = "institution";

/// Global attribute: dataset title
pub const ATTR_TITLE: &str = "title";

/// Global attribute: data source
pub const ATTR_SOURCE: &str = "source";

/// Global attribute: originator of the data
pub const ATTR_ORIGINATOR: &str = "originator";

/// Global attribute: contact address
pub const ATTR_CONTACT: &str = "contact";

/// Global attribute: creation timestamp
pub const ATTR_CREATION_DATE: &str = "creation_date";

// ---------------------------------------------------------------------------
// Variable attribute names
// ---------------------------------------------------------------------------

/// Variable attribute: physical unit
pub const ATTR_UNITS: &str = "units";

/// Variable attribute: CF standard (or long descriptive) name
pub const ATTR_STANDARD_NAME: &str = "standard_name";

/// Variable attribute: long descriptive name
pub const ATTR_LONG_NAME: &str = "long_name";

/// Variable attribute: direction of increasing vertical coordinate
pub const ATTR_POSITIVE: &str = "positive";

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

/// Primary (unbounded) time dimension
pub const TIME_DIMENSION: &str = "T";

/// Fixed-length depth dimension
pub const DEPTH_DIMENSION: &str = "Z";

/// Leaf name of every time coordinate variable
pub const TIME_VARIABLE: &str = "time";

/// Name of the depth coordinate variable
pub const DEPTH_VARIABLE: &str = "z";

/// Units of every time coordinate
pub const TIME_UNITS: &str = "seconds since 1970-01-01 00:00:00";

/// Standard name of every time coordinate
pub const TIME_STANDARD_NAME: &str = "time";

/// Units of the depth coordinate
pub const DEPTH_UNITS: &str = "m";

/// Standard name of the depth coordinate
pub const DEPTH_STANDARD_NAME: &str = "depth";

/// Long name of the depth coordinate
pub const DEPTH_LONG_NAME: &str = "water depth relative to sea surface";

/// Depth increases downward
pub const DEPTH_POSITIVE: &str = "down";

/// Separator of group path segments in variable names
pub const GROUP_SEPARATOR: char = '/';
