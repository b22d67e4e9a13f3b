use ratatui::style::Color;

// Logo colors (circumflex-inspired)
pub const LOGO_CORAL: Color = Color::Rgb(232, 131, 136);     // #E88388
pub const LOGO_GOLD: Color = Color::Rgb(219, 171, 121);      // #DBAB79
pub const LOGO_LIGHT_BLUE: Color = Color::Rgb(124, 175, 194); // #7CAFC2
pub const LOGO_MINT: Color = Color::Rgb(161, 193, 129);       // #A1C181

// UI colors
pub const TEXT_DIM: Color = Color::Rgb(136, 136, 136);        // #888888
pub const TEXT_WHITE: Color = Color::Rgb(255, 255, 255);      // #FFFFFF
pub const TEXT_BLACK: Color = Color::Rgb(0, 0, 0);            // #000000

// Field colors
pub const FIELD_BG: Color = Color::Rgb(48, 48, 48);           // #303030
pub const FIELD_PRELIGHT: Color = Color::Rgb(124, 175, 194);  // focused field, #7CAFC2
pub const FIELD_ERROR: Color = Color::Rgb(170, 60, 66);       // #AA3C42

// Popup colors
pub const POPUP_BG: Color = Color::Rgb(30, 30, 30);           // #1E1E1E
pub const POPUP_ACTIVE: Color = Color::Rgb(219, 171, 121);    // highlighted spinner row

// Amount colors
pub const CREDIT_GREEN: Color = Color::Rgb(134, 179, 69);     // deposits
pub const DEBIT_RED: Color = Color::Rgb(232, 131, 136);       // payments
