use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_command_bg: Color,
    pub pointer_cell_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    number: Color::Rgb(250, 179, 135),          // Orange for cell values
    border_focused: Color::Rgb(249, 226, 175),  // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),   // Grey border for normal
    current_command_bg: Color::Rgb(69, 71, 90), // Lighter BG under the cursor
    pointer_cell_bg: Color::Rgb(49, 50, 68),    // BG of the pointed-at cell
};
