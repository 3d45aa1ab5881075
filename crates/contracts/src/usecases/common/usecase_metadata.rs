/// Identification metadata shared by every usecase screen
pub trait UseCaseMetadata {
    /// Usecase index, e.g. "u508"
    fn usecase_index() -> &'static str;

    /// Technical name, e.g. "import_csv"
    fn usecase_name() -> &'static str;

    /// Title shown in the UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Full name like "u508_import_csv"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// DOM id of the usecase root element, e.g. "u508_import_csv--usecase"
    fn element_id() -> String {
        format!("{}--usecase", Self::full_name())
    }
}
