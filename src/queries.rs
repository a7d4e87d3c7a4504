//! Every statement the workflow issues, and the listings built from them.
//!
//! Listings are never cached: each call re-runs its query, so choices always
//! reflect the current contents of the database.

use crate::choice::Choice;
use crate::core::db::{Executor, QueryResult, Record};
use crate::core::{Result, TrackerError};
use rusqlite::types::Value;

pub const LIST_DEPARTMENTS: &str =
    "SELECT department.id, department.name AS department FROM department ORDER BY department.id";

pub const LIST_ROLES: &str = "SELECT roles.id, roles.title, roles.salary, department.name AS department \
     FROM roles JOIN department ON roles.department_id = department.id ORDER BY roles.id";

pub const LIST_EMPLOYEES: &str = "SELECT employee.id, employee.last_name || ', ' || employee.first_name AS Employee, \
     roles.title, employee.manager_id FROM employee JOIN roles ON employee.role_id = roles.id ORDER BY employee.id";

pub const LIST_MANAGERS: &str =
    "SELECT id, first_name, last_name FROM employee WHERE manager_id IS NULL ORDER BY id";

pub const FIND_MANAGER_ID: &str = "SELECT manager_id FROM employee WHERE employee.id = ?";

pub const INSERT_DEPARTMENT: &str = "INSERT INTO department (name) VALUES (?)";

pub const INSERT_ROLE: &str = "INSERT INTO roles (title, salary, department_id) VALUES (?,?,?)";

pub const INSERT_EMPLOYEE: &str =
    "INSERT INTO employee (first_name, last_name, role_id, manager_id) VALUES (?,?,?,?)";

pub const UPDATE_EMPLOYEE: &str = "UPDATE employee SET role_id=?, manager_id=? WHERE employee.id=?";

/// A role about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub title: String,
    /// Stored exactly as typed, e.g. `$60,000`
    pub salary: String,
    pub department_id: i64,
}

/// An employee about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role_id: i64,
    pub manager_id: Option<i64>,
}

pub fn list_departments<E: Executor + ?Sized>(db: &mut E) -> Result<QueryResult> {
    db.query(LIST_DEPARTMENTS, &[])
}

pub fn list_roles<E: Executor + ?Sized>(db: &mut E) -> Result<QueryResult> {
    db.query(LIST_ROLES, &[])
}

pub fn list_employees<E: Executor + ?Sized>(db: &mut E) -> Result<QueryResult> {
    db.query(LIST_EMPLOYEES, &[])
}

pub fn department_choices<E: Executor + ?Sized>(db: &mut E) -> Result<Vec<Choice>> {
    to_choices(&list_departments(db)?, |r| r.text("department"))
}

pub fn role_choices<E: Executor + ?Sized>(db: &mut E) -> Result<Vec<Choice>> {
    to_choices(&list_roles(db)?, |r| r.text("title"))
}

pub fn employee_choices<E: Executor + ?Sized>(db: &mut E) -> Result<Vec<Choice>> {
    to_choices(&list_employees(db)?, |r| r.text("Employee"))
}

/// Employees without a manager of their own.
pub fn manager_choices<E: Executor + ?Sized>(db: &mut E) -> Result<Vec<Choice>> {
    let result = db.query(LIST_MANAGERS, &[])?;
    to_choices(&result, |r| {
        Ok(format!("{}, {}", r.text("last_name")?, r.text("first_name")?))
    })
}

/// Current manager of `employee_id`, `None` when the employee has none.
pub fn find_manager_id<E: Executor + ?Sized>(db: &mut E, employee_id: i64) -> Result<Option<i64>> {
    let result = db.query(FIND_MANAGER_ID, &[Value::Integer(employee_id)])?;
    let manager_id = match result.records().next() {
        Some(record) => record.optional_integer("manager_id"),
        None => Err(TrackerError::NotFound {
            entity: "employee",
            id: employee_id,
        }),
    };
    manager_id
}

pub fn insert_department<E: Executor + ?Sized>(db: &mut E, name: &str) -> Result<()> {
    db.query(INSERT_DEPARTMENT, &[Value::Text(name.to_string())])?;
    Ok(())
}

pub fn insert_role<E: Executor + ?Sized>(db: &mut E, role: &NewRole) -> Result<()> {
    db.query(
        INSERT_ROLE,
        &[
            Value::Text(role.title.clone()),
            Value::Text(role.salary.clone()),
            Value::Integer(role.department_id),
        ],
    )?;
    Ok(())
}

pub fn insert_employee<E: Executor + ?Sized>(db: &mut E, employee: &NewEmployee) -> Result<()> {
    db.query(
        INSERT_EMPLOYEE,
        &[
            Value::Text(employee.first_name.clone()),
            Value::Text(employee.last_name.clone()),
            Value::Integer(employee.role_id),
            nullable(employee.manager_id),
        ],
    )?;
    Ok(())
}

/// Sets both the role and the manager of an employee.
pub fn update_employee<E: Executor + ?Sized>(
    db: &mut E,
    employee_id: i64,
    role_id: i64,
    manager_id: Option<i64>,
) -> Result<()> {
    let result = db.query(
        UPDATE_EMPLOYEE,
        &[Value::Integer(role_id), nullable(manager_id), Value::Integer(employee_id)],
    )?;
    if result.rows_affected == 0 {
        tracing::warn!(employee_id, "Update matched no employee");
    }
    Ok(())
}

fn nullable(id: Option<i64>) -> Value {
    id.map_or(Value::Null, Value::Integer)
}

fn to_choices<F>(result: &QueryResult, label: F) -> Result<Vec<Choice>>
where
    F: Fn(&Record<'_>) -> Result<String>,
{
    result
        .records()
        .map(|record| Ok(Choice::new(record.integer("id")?, label(&record)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::seeded_database;

    #[test]
    fn test_listings_join_names() {
        let mut db = seeded_database();

        let roles = list_roles(&mut db).unwrap();
        assert_eq!(roles.columns, vec!["id", "title", "salary", "department"]);
        assert_eq!(roles.display_rows()[0], vec!["1", "Engineer", "$100,000", "Engineering"]);

        let employees = list_employees(&mut db).unwrap();
        assert_eq!(employees.columns, vec!["id", "Employee", "title", "manager_id"]);
        assert_eq!(employees.display_rows()[2], vec!["3", "Smith, John", "Engineer", "1"]);
    }

    #[test]
    fn test_choices() {
        let mut db = seeded_database();

        assert_eq!(
            department_choices(&mut db).unwrap(),
            vec![
                Choice::new(1, "Engineering"),
                Choice::new(2, "Sales"),
                Choice::new(3, "Finance"),
            ]
        );
        assert_eq!(role_choices(&mut db).unwrap()[1], Choice::new(2, "Manager"));
        assert_eq!(employee_choices(&mut db).unwrap()[2], Choice::new(3, "Smith, John"));
        assert_eq!(
            manager_choices(&mut db).unwrap(),
            vec![Choice::new(1, "Lovelace, Ada"), Choice::new(2, "Hopper, Grace")]
        );
    }

    #[test]
    fn test_find_manager_id() {
        let mut db = seeded_database();

        assert_eq!(find_manager_id(&mut db, 3).unwrap(), Some(1));
        assert_eq!(find_manager_id(&mut db, 1).unwrap(), None);
        assert!(matches!(
            find_manager_id(&mut db, 99),
            Err(TrackerError::NotFound { entity: "employee", id: 99 })
        ));
    }

    #[test]
    fn test_find_manager_id_follows_updates() {
        let mut db = seeded_database();

        update_employee(&mut db, 3, 2, None).unwrap();
        assert_eq!(find_manager_id(&mut db, 3).unwrap(), None);

        update_employee(&mut db, 3, 2, Some(2)).unwrap();
        assert_eq!(find_manager_id(&mut db, 3).unwrap(), Some(2));
    }

    #[test]
    fn test_insert_employee_without_manager_stores_null() {
        let mut db = seeded_database();

        insert_employee(
            &mut db,
            &NewEmployee {
                first_name: "Linus".to_string(),
                last_name: "Torvalds".to_string(),
                role_id: 1,
                manager_id: None,
            },
        )
        .unwrap();

        let result = db
            .query("SELECT manager_id FROM employee WHERE last_name = ?", &[Value::Text("Torvalds".to_string())])
            .unwrap();
        assert_eq!(result.rows, vec![vec![Value::Null]]);
    }

    #[test]
    fn test_insert_role_requires_existing_department() {
        let mut db = seeded_database();

        let result = insert_role(
            &mut db,
            &NewRole {
                title: "Ghost".to_string(),
                salary: "1".to_string(),
                department_id: 404,
            },
        );
        match result {
            Err(TrackerError::Database { sql: Some(sql), .. }) => assert_eq!(sql, INSERT_ROLE),
            other => panic!("Expected Database error, got {:?}", other),
        }
    }
}
