/// All possible actions in the application (command pattern)
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Quit,
    ToggleHelp,
    DismissError,

    // Focus movement
    FocusFilters,
    FocusTable,

    // Filter form editing
    NextField,
    PrevField,
    FieldInput(char),
    FieldBackspace,
    FieldClearInput,
    CycleLevel,
    CycleLevelBack,
    SubmitFilters,
    ClearFilters,

    // Table navigation
    RowUp,
    RowDown,
    RowTop,
    RowBottom,
    SelectRow,
    CloseDetail,

    // Pagination
    NextPage,
    PrevPage,
    GotoPage(u64),

    // Re-run the current query
    Refresh,

    // Tick (for periodic updates)
    Tick,

    // Render request
    Render,
}
