use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub emp_number: i64,
    pub first_name: String,
    pub last_name: String,
    pub termination_id: Option<i64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_past_employee(&self) -> bool {
        self.termination_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectActivity {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
}
