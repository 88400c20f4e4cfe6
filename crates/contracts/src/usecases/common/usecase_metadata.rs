/// Метаданные UseCase для идентификации и маршрутизации
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u501")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "import_from_pdf")
    fn usecase_name() -> &'static str;

    /// Отображаемое имя для UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u501_import_from_pdf"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// Префикс маршрутов API: "/api/u501"
    fn api_prefix() -> String {
        format!("/api/{}", Self::usecase_index())
    }
}
