use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use taskdeck_core::{BoardView, Category, DueStatus, Priority, TaskDto};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "St")]
    status: String,
    #[tabled(rename = "Pri")]
    priority: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Task")]
    title: String,
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn due_cell(dto: &TaskDto) -> String {
    let Some(due) = dto.task.due_date else {
        return "-".to_string();
    };
    match dto.due_status {
        Some(DueStatus::Overdue) => format!("{} (overdue)", due.format("%Y-%m-%d")),
        Some(DueStatus::Today) => "today".to_string(),
        _ => due.format("%Y-%m-%d").to_string(),
    }
}

fn priority_cell(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "H",
        Priority::Medium => "M",
        Priority::Low => "L",
    }
}

pub fn print_tasks(view: &BoardView) {
    if view.tasks.is_empty() {
        println!("No tasks found.");
    } else {
        let rows: Vec<TaskRow> = view
            .tasks
            .iter()
            .map(|dto| TaskRow {
                id: short_id(&dto.task.id),
                status: if dto.task.completed { "✔" } else { "☐" }.to_string(),
                priority: priority_cell(dto.task.priority).to_string(),
                due: due_cell(dto),
                category: dto.category_name().to_string(),
                title: dto.task.title.clone(),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
        println!("{table}");
    }

    let c = &view.counts;
    println!(
        "{} open · {} due today · {} overdue · {} completed",
        c.all, c.today, c.overdue, c.completed
    );
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Icon")]
    icon: String,
}

pub fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories defined.");
        return;
    }
    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            id: short_id(&c.id),
            name: c.name.clone(),
            color: c.color.clone(),
            icon: c.icon.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{table}");
}
