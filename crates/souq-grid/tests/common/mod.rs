#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use souq_grid::{Column, TableView};

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: u32,
    pub name: String,
    pub phone: String,
}

pub fn member(id: u32, name: &str) -> Member {
    Member {
        id,
        name: name.to_string(),
        phone: format!("05{id:08}"),
    }
}

/// 25 members, three of them matching "ali" (ids 4, 11 and 19).
pub fn members() -> Vec<Member> {
    let names = [
        "Sara", "Omar", "Huda", "Khalil", "Noura", "Fahd", "Reem", "Majed", "Lina", "Yousef",
        "Salim", "Dana", "Tariq", "Hind", "Faisal", "Maha", "Nasser", "Aisha", "Alia", "Bader",
        "Rana", "Ziad", "Ahmad", "Mona", "Hamza",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| member(u32::try_from(i + 1).unwrap(), name))
        .collect()
}

pub fn member_columns() -> Vec<Column<Member>> {
    vec![
        Column::new("name", "Name", |m: &Member| m.name.clone()).sortable(true),
        Column::new("phone", "Phone", |m: &Member| m.phone.clone()).searchable(false),
    ]
}

pub fn names(view: &TableView<'_, Member>) -> Vec<String> {
    view.rows.iter().map(|r| r.row.name.clone()).collect()
}

/// A callback sink recording every value it receives.
pub fn recorder() -> (Arc<Mutex<Vec<usize>>>, impl Fn(usize) + Send + Sync + 'static) {
    let calls = Arc::new(Mutex::new(Vec::<usize>::new()));
    let sink = Arc::clone(&calls);
    (calls, move |n: usize| sink.lock().unwrap().push(n))
}
