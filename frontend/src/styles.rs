pub const CONTAINER: &str = "bg-gray-900 container mx-auto px-6 py-10 max-w-5xl rounded-xl shadow-lg mt-8";
pub const CONTAINER_SM: &str = "container mx-auto px-6 py-10 max-w-2xl rounded-xl shadow-lg mt-8";

pub const CARD: &str = "bg-gray-800 border border-gray-700 rounded-lg shadow-md p-6";
pub const CARD_HOVER_SCALE: &str = "bg-gray-800 border border-gray-700 rounded-lg shadow-md p-6 flex flex-col items-center transform transition-transform duration-200 hover:scale-105";
pub const ALERT_CARD: &str = "p-4 rounded-lg shadow-md mb-6";

pub const BUTTON_BASE: &str = "px-5 py-2 rounded-lg font-medium text-white transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_PRIMARY: &str = "bg-blue-600 hover:bg-blue-700 focus:ring-2 focus:ring-blue-400 focus:outline-none";
pub const BUTTON_SUCCESS: &str = "bg-green-600 hover:bg-green-700 focus:ring-2 focus:ring-green-400 focus:outline-none";
pub const BUTTON_FULL: &str = "w-full py-3 px-5 font-semibold rounded-lg transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed mt-4";

pub const TEXT_MUTED: &str = "text-sm text-gray-400";
pub const HEADING_LG: &str = "text-3xl font-extrabold mb-6 text-center text-gray-100";
pub const HEADING_MD: &str = "text-2xl font-bold mb-5 text-gray-100";
pub const HEADING_SM: &str = "text-xl font-semibold mb-3 text-gray-100";

pub const FLEX_BETWEEN: &str = "flex justify-between items-center";
pub const GRID_ITEMS: &str = "grid gap-6 sm:grid-cols-2 lg:grid-cols-3";
pub const SPACE_Y_LG: &str = "space-y-6";

pub const PROGRESS_TRACK: &str = "w-full h-3 bg-gray-700 rounded-full overflow-hidden";
pub const PROGRESS_BAR: &str = "h-3 bg-blue-500 rounded-full transition-all duration-300";

pub fn combine_classes(base: &str, additional: &str) -> String {
    format!("{} {}", base, additional)
}

pub fn button_primary(full_width: bool) -> String {
    if full_width {
        combine_classes(BUTTON_BASE, &combine_classes(BUTTON_PRIMARY, BUTTON_FULL))
    } else {
        combine_classes(BUTTON_BASE, BUTTON_PRIMARY)
    }
}

pub fn button_vote() -> String {
    combine_classes(BUTTON_BASE, &combine_classes(BUTTON_SUCCESS, BUTTON_FULL))
}

pub fn alert_style(style: &str) -> String {
    match style {
        "error" => combine_classes(ALERT_CARD, "bg-red-500 text-white shadow-lg"),
        "success" => combine_classes(ALERT_CARD, "bg-green-500 text-white shadow-lg"),
        "warning" => combine_classes(ALERT_CARD, "bg-yellow-500 text-white shadow-lg"),
        _ => combine_classes(ALERT_CARD, "bg-blue-500 text-white shadow-lg"),
    }
}
