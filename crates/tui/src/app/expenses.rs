use api_types::expense::{Expense, SearchKey, SortBy};
use chrono::NaiveDate;
use listing::{
    DatePreset, FetchRequest, ListController, PageSize, Query,
    validation::{ExpenseDraft, FieldErrors},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpensesMode {
    List,
    Search,
    Category,
    Form,
    ConfirmDelete,
}

impl ExpensesMode {
    /// Modes where printable keys are typed into a field.
    pub fn is_text_entry(self) -> bool {
        matches!(self, Self::Search | Self::Category | Self::Form)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Amount,
    Category,
    ExpenseDate,
    PaymentMethod,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        Self::Title,
        Self::Amount,
        Self::Category,
        Self::ExpenseDate,
        Self::PaymentMethod,
        Self::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::ExpenseDate => "Date",
            Self::PaymentMethod => "Payment",
            Self::Notes => "Notes",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn value(self, draft: &ExpenseDraft) -> &str {
        match self {
            Self::Title => &draft.title,
            Self::Amount => &draft.amount,
            Self::Category => &draft.category,
            Self::ExpenseDate => &draft.expense_date,
            Self::PaymentMethod => &draft.payment_method,
            Self::Notes => &draft.notes,
        }
    }

    fn value_mut(self, draft: &mut ExpenseDraft) -> &mut String {
        match self {
            Self::Title => &mut draft.title,
            Self::Amount => &mut draft.amount,
            Self::Category => &mut draft.category,
            Self::ExpenseDate => &mut draft.expense_date,
            Self::PaymentMethod => &mut draft.payment_method,
            Self::Notes => &mut draft.notes,
        }
    }

    pub fn error(self, errors: &FieldErrors) -> Option<&str> {
        match self {
            Self::Title => errors.title.as_deref(),
            Self::Amount => errors.amount.as_deref(),
            Self::Category => errors.category.as_deref(),
            Self::ExpenseDate => errors.expense_date.as_deref(),
            Self::PaymentMethod => errors.payment_method.as_deref(),
            Self::Notes => errors.notes.as_deref(),
        }
    }
}

/// Create/edit form. `editing` holds the id of the record being edited.
#[derive(Debug, Clone)]
pub struct FormState {
    pub draft: ExpenseDraft,
    pub focus: FormField,
    pub editing: Option<i64>,
    pub errors: FieldErrors,
}

impl FormState {
    pub fn create(today: NaiveDate) -> Self {
        Self {
            draft: ExpenseDraft {
                expense_date: today.format("%Y-%m-%d").to_string(),
                ..ExpenseDraft::default()
            },
            focus: FormField::Title,
            editing: None,
            errors: FieldErrors::default(),
        }
    }

    pub fn edit(expense: &Expense) -> Self {
        Self {
            draft: ExpenseDraft::from_expense(expense),
            focus: FormField::Title,
            editing: Some(expense.id),
            errors: FieldErrors::default(),
        }
    }

    pub fn push(&mut self, ch: char) {
        self.focus.value_mut(&mut self.draft).push(ch);
    }

    pub fn pop(&mut self) {
        self.focus.value_mut(&mut self.draft).pop();
    }
}

#[derive(Debug)]
pub struct ExpensesState {
    pub controller: ListController,
    pub mode: ExpensesMode,
    pub selected: usize,
    pub preset: DatePreset,
    pub category_input: String,
    pub form: Option<FormState>,
    pub pending_delete: Option<Expense>,
}

impl ExpensesState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            controller: ListController::new(Query::new(page_size)),
            mode: ExpensesMode::List,
            selected: 0,
            preset: DatePreset::AllTime,
            category_input: String::new(),
            form: None,
            pending_delete: None,
        }
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.controller.items().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.controller.items().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the cursor on a row after the list changed underneath it.
    pub fn clamp_selection(&mut self) {
        let len = self.controller.items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn set_preset(&mut self, preset: DatePreset, today: NaiveDate) -> Option<FetchRequest> {
        self.preset = preset;
        let (from, to) = preset.range(today).unzip();
        self.controller.set_date_range(from, to)
    }

    pub fn cycle_search_key(&mut self) -> Option<FetchRequest> {
        let current = self.controller.query().search_key;
        let index = SearchKey::ALL.iter().position(|k| *k == current).unwrap_or(0);
        let next = SearchKey::ALL[(index + 1) % SearchKey::ALL.len()];
        self.controller.set_search_key(next)
    }

    pub fn cycle_sort_column(&mut self) -> Option<FetchRequest> {
        let query = self.controller.query();
        let index = SortBy::ALL.iter().position(|s| *s == query.sort_by).unwrap_or(0);
        let next = SortBy::ALL[(index + 1) % SortBy::ALL.len()];
        let order = query.sort_order;
        self.controller.set_sort(next, order)
    }

    pub fn toggle_sort_order(&mut self) -> Option<FetchRequest> {
        let query = self.controller.query();
        let (sort_by, order) = (query.sort_by, query.sort_order.toggled());
        self.controller.set_sort(sort_by, order)
    }

    pub fn clear_filters(&mut self) -> Option<FetchRequest> {
        self.preset = DatePreset::AllTime;
        self.category_input.clear();
        self.controller.clear_filters()
    }

    pub fn open_form(&mut self, form: FormState) {
        self.form = Some(form);
        self.mode = ExpensesMode::Form;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.mode = ExpensesMode::List;
    }
}

#[cfg(test)]
mod tests {
    use api_types::expense::SortOrder;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn form_fields_cycle_both_ways() {
        assert_eq!(FormField::Notes.next(), FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Notes);
        assert_eq!(FormField::Amount.next(), FormField::Category);
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut form = FormState::create(today());
        assert_eq!(form.draft.expense_date, "2026-10-18");

        form.push('I');
        form.push('n');
        form.push('k');
        form.focus = FormField::Amount;
        form.push('4');
        form.push('2');
        form.pop();

        assert_eq!(form.draft.title, "Ink");
        assert_eq!(form.draft.amount, "4");
        assert_eq!(FormField::Title.value(&form.draft), "Ink");
    }

    #[test]
    fn sort_column_cycles_and_order_toggles() {
        let mut expenses = ExpensesState::new(PageSize::default());
        let request = expenses.cycle_sort_column().unwrap();
        assert_ne!(request.page_query.sort_by, Some(SortBy::ExpenseDate));

        let request = expenses.toggle_sort_order().unwrap();
        assert_eq!(request.page_query.sort_order, Some(SortOrder::Asc));
    }

    #[test]
    fn clearing_filters_resets_the_preset() {
        let mut expenses = ExpensesState::new(PageSize::default());
        expenses.set_preset(DatePreset::LastMonth, today()).unwrap();
        expenses.category_input = "Rent".to_string();

        let request = expenses.clear_filters().unwrap();
        assert_eq!(expenses.preset, DatePreset::AllTime);
        assert!(expenses.category_input.is_empty());
        assert!(request.page_query.date_from.is_none());
    }

    #[test]
    fn selection_stays_in_bounds_on_empty_list() {
        let mut expenses = ExpensesState::new(PageSize::default());
        expenses.select_next();
        expenses.select_prev();
        expenses.clamp_selection();
        assert_eq!(expenses.selected, 0);
        assert!(expenses.selected_expense().is_none());
    }
}
