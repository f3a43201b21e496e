pub const APP_NAME: &str = "blockart";

pub const BLOCKART_CONFIG_FILE: &str = "blockart.config";
pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

pub const INPUT_DIR: &str = "Input Images";
pub const OUTPUT_DIR: &str = "Ascii Art";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
pub const OUTPUT_EXTENSION: &str = "html";

pub const DEFAULT_MAX_DIMENSION: u32 = 128;

/// Side length of a table cell in the classic layout.
pub const TABLE_CELL_PX: u32 = 10;

pub const DOCUMENT_TITLE: &str = "Minecraft Pixel Art";
