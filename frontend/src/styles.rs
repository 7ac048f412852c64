pub const CONTAINER: &str = "min-h-screen bg-gray-50 dark:bg-gray-900 w-full px-4 sm:px-6 lg:px-8";
pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] p-6";
pub const WHEEL_CARD: &str = "bg-white dark:bg-gray-800 p-6 sm:p-8 rounded-2xl shadow-xl dark:shadow-[0_8px_30px_-12px_rgba(255,255,255,0.1)] max-w-2xl mx-auto border border-gray-100 dark:border-gray-700 backdrop-blur-sm";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 shadow-lg hover:shadow-xl transition-all duration-300";
pub const BUTTON_SECONDARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white hover:bg-gray-50 dark:hover:bg-gray-800";
pub const BUTTON_DANGER: &str = "inline-flex items-center justify-center rounded-lg bg-red-600 px-4 py-2 font-medium text-white hover:bg-red-700";
pub const BUTTON_ICON: &str = "p-2 text-gray-800 dark:text-white hover:text-blue-600 dark:hover:text-blue-400 rounded-lg transition-colors duration-200";
pub const INPUT: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-1 ring-inset ring-gray-300 dark:ring-gray-700 placeholder:text-gray-400 focus:ring-2 focus:ring-blue-600";
pub const INPUT_STOCK: &str = "w-24 rounded-lg border-0 bg-white dark:bg-gray-900 py-1 px-2 text-right text-gray-900 dark:text-white shadow-sm ring-1 ring-inset ring-gray-300 dark:ring-gray-700 focus:ring-2 focus:ring-blue-600";
pub const TEXT_H1: &str = "text-3xl font-bold text-gray-900 dark:text-white";
pub const TEXT_H3: &str = "text-xl font-bold text-gray-900 dark:text-white";
pub const TEXT_SMALL: &str = "text-sm text-gray-500 dark:text-gray-400";
pub const TEXT_LABEL: &str = "block text-sm font-medium text-gray-900 dark:text-white";
pub const ALERT_SUCCESS: &str = "bg-green-50 dark:bg-green-900/50 border border-green-200 dark:border-green-800 rounded-lg p-4 text-green-700 dark:text-green-200";
pub const ALERT_ERROR: &str = "bg-red-50 dark:bg-red-900/50 border border-red-200 dark:border-red-800 rounded-lg p-4 text-red-700 dark:text-red-200";
pub const ALERT_WARNING: &str = "p-4 mb-4 text-sm text-yellow-800 rounded-lg bg-yellow-50 dark:bg-gray-900 dark:text-yellow-400";
