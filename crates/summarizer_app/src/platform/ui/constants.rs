pub const APP_TITLE: &str = "Article Summarizer";
pub const SUBTITLE: &str =
    "Enter the URL of an article to get a summary, key points, and an accuracy score.";
pub const INPUT_TITLE: &str = " Article URL ";
pub const INPUT_PLACEHOLDER: &str = "https://...";
pub const CLEAR_LABEL: &str = "Clear Results";
pub const ERROR_TITLE: &str = " An Error Occurred ";
pub const SUMMARY_TITLE: &str = "AI Summary";
pub const POINTS_TITLE: &str = "Key Points";
pub const ACCURACY_TITLE: &str = " Estimated Accuracy ";
pub const HELP_TEXT: &str =
    "Enter submit | ^L clear | ^Y copy summary | ^K copy points | ^U erase | Esc quit";
