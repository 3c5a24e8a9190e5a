#![allow(dead_code)]

use serde_json::{json, Value};

const USER_NAMES: [&str; 12] = [
    "Ahmad",
    "Ali Hassan",
    "Basma",
    "Dalia",
    "Emad",
    "Fatima",
    "Ghada",
    "Hani",
    "Iman",
    "Jamal",
    "Kareem",
    "Latifa",
];

const CITIES: [&str; 3] = ["Riyadh", "Jeddah", "Dammam"];

/// 12 users, registered on consecutive days of March 2024 (id 1 first).
/// "ali" matches "Ali Hassan" (id 2) and "Dalia" (id 4).
pub fn users() -> Vec<Value> {
    USER_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let id = i + 1;
            json!({
                "id": id,
                "name": name,
                "email": format!("user{id}@souq.example"),
                "phone": format!("0500000{id:03}"),
                "city": CITIES[i % CITIES.len()],
                "role": if id == 1 { "admin" } else { "user" },
                "ads_count": id * 2,
                "created_at": format!("2024-03-{id:02}T08:00:00Z"),
            })
        })
        .collect()
}

pub fn ok_body(data: Value) -> String {
    json!({ "success": true, "data": data }).to_string()
}

pub fn users_body() -> String {
    ok_body(Value::Array(users()))
}

pub fn advertising(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "category": "Cars",
        "city": "Riyadh",
        "price": 1000.0 * f64::from(u32::try_from(id).unwrap()),
        "owner": "Omar",
        "status": "active",
        "views": id * 7,
        "created_at": format!("2024-05-{id:02}T10:00:00Z"),
    })
}

/// Page 2 of a server-paginated list of 14 ads, three per page.
pub fn advertisings_page_body() -> String {
    ok_body(json!({
        "data": [
            advertising(4, "Camry 2019"),
            advertising(5, "Hilux"),
            advertising(6, "Land Cruiser"),
        ],
        "current_page": 2,
        "last_page": 5,
        "per_page": 3,
        "total": 14,
    }))
}

/// Returns the position of `needle` in `html`, panicking when absent.
pub fn position(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in rendered page"))
}
