use chrono::NaiveDate;
use ratatui::widgets::TableState;
use taskdeck_core::{
    parse_args, to_new_task, to_patch, Board, BoardView, CategoryRepository, CategoryService,
    Filter, Priority, TaskRepository, TaskService,
};
use uuid::Uuid;

pub enum InputMode {
    Normal,
    Adding,
    Editing,
    Searching,
}

/// Sidebar layout: the first block of entries are the fixed views, the next
/// the priority levels, the rest one entry per category.
pub const VIEW_ENTRIES: usize = 5;
pub const PRIORITY_ENTRIES: usize = 3;

/// Full-screen interface state: the active filter, the board view it
/// resolves to, list selection, and the quick-add/search input line.
///
/// Every mutation goes through the services and then re-derives the whole
/// view; failures land in `notice` and are shown as a transient message.
pub struct App<T: TaskRepository, C: CategoryRepository> {
    tasks: TaskService<T>,
    categories: CategoryService<C>,
    pub view: BoardView,
    pub filter: Filter,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub notice: Option<String>,
    pub today: NaiveDate,
}

impl<T: TaskRepository, C: CategoryRepository> App<T, C> {
    pub fn new(
        tasks: TaskService<T>,
        categories: CategoryService<C>,
    ) -> taskdeck_core::Result<Self> {
        let today = taskdeck_core::today();
        let filter = Filter::All;
        let view = Board::new(&tasks, &categories).view(&filter, today)?;

        let mut state = TableState::default();
        if !view.tasks.is_empty() {
            state.select(Some(0));
        }
        Ok(App {
            tasks,
            categories,
            view,
            filter,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            notice: None,
            today,
        })
    }

    /// Re-derives the board for the active filter. The error path is the
    /// notice line; the previous view stays on screen.
    pub fn refresh(&mut self) {
        self.today = taskdeck_core::today();
        match Board::new(&self.tasks, &self.categories).view(&self.filter, self.today) {
            Ok(view) => {
                self.view = view;
                self.notice = None;
                let len = self.view.tasks.len();
                match self.state.selected() {
                    Some(_) if len == 0 => self.state.select(None),
                    Some(i) if i >= len => self.state.select(Some(len - 1)),
                    None if len > 0 => self.state.select(Some(0)),
                    _ => {}
                }
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    /// Sidebar entries in display and cycle order: views, priorities, then
    /// one entry per category.
    pub fn sidebar_entries(&self) -> Vec<(String, Filter)> {
        let mut entries = vec![
            ("All Tasks".to_string(), Filter::All),
            ("Due Today".to_string(), Filter::Today),
            ("Upcoming".to_string(), Filter::Upcoming),
            ("Overdue".to_string(), Filter::Overdue),
            ("Completed".to_string(), Filter::Completed),
            ("High Priority".to_string(), Filter::Priority(Priority::High)),
            ("Medium Priority".to_string(), Filter::Priority(Priority::Medium)),
            ("Low Priority".to_string(), Filter::Priority(Priority::Low)),
        ];
        for category in &self.view.categories {
            entries.push((category.name.clone(), Filter::Category(category.id)));
        }
        entries
    }

    fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.state.select(None);
        self.refresh();
    }

    pub fn next_filter(&mut self) {
        let entries = self.sidebar_entries();
        let idx = entries.iter().position(|(_, f)| *f == self.filter);
        let next = match idx {
            Some(i) => (i + 1) % entries.len(),
            None => 0,
        };
        self.set_filter(entries[next].1.clone());
    }

    pub fn previous_filter(&mut self) {
        let entries = self.sidebar_entries();
        let idx = entries.iter().position(|(_, f)| *f == self.filter);
        let prev = match idx {
            Some(i) => (i + entries.len() - 1) % entries.len(),
            None => 0,
        };
        self.set_filter(entries[prev].1.clone());
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(Filter::All);
    }

    pub fn next(&mut self) {
        if self.view.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.view.tasks.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.view.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.view.tasks.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn selected_task_id(&self) -> Option<Uuid> {
        self.state
            .selected()
            .and_then(|i| self.view.tasks.get(i))
            .map(|dto| dto.task.id)
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if let Err(err) = self.tasks.toggle_complete(&id) {
                self.notice = Some(err.to_string());
                return;
            }
            self.refresh();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if let Err(err) = self.tasks.delete(&id) {
                self.notice = Some(err.to_string());
                return;
            }
            self.refresh();
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_edit_mode(&mut self) {
        if self.state.selected().is_some() {
            self.input_mode = InputMode::Editing;
            self.input.clear();
            self.cursor_position = 0;
        }
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.submit_add(),
            InputMode::Editing => self.submit_edit(),
            InputMode::Searching => self.submit_search(),
            InputMode::Normal => {}
        }
        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn submit_add(&mut self) {
        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        if args.is_empty() {
            return;
        }
        let parsed = parse_args(&args);

        let result = to_new_task(&parsed, &self.view.categories)
            .and_then(|payload| self.tasks.create_task(payload));
        match result {
            Ok(_) => {
                self.refresh();
                if !self.view.tasks.is_empty() {
                    self.state.select(Some(0));
                }
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    fn submit_edit(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        if args.is_empty() {
            return;
        }
        let parsed = parse_args(&args);

        let result = to_patch(&parsed, &self.view.categories)
            .and_then(|patch| self.tasks.update(&id, &patch));
        match result {
            Ok(_) => self.refresh(),
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    fn submit_search(&mut self) {
        let query = self.input.trim();
        let filter = if query.is_empty() {
            Filter::All
        } else {
            Filter::Search(query.to_string())
        };
        self.set_filter(filter);
    }
}
