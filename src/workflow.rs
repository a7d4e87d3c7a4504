//! The interactive menu loop and its action handlers.
//!
//! Each handler runs to completion before the menu is shown again: prompts
//! and statements are issued strictly one after another. Database failures
//! are not handled here; they propagate out of [`Workflow::run`].

use crate::choice::{manager_id, Choice, ManagerChoice, NO_MANAGER};
use crate::core::db::{Executor, QueryResult};
use crate::core::{Result, TrackerError};
use crate::menu::{LoopControl, MenuAction};
use crate::prompt::Prompter;
use crate::queries::{self, NewEmployee, NewRole};
use crate::results_grid::ResultsGrid;
use crate::validation::validate_salary;
use std::io::Write;
use tracing::info;

pub const BANNER: &str = r#"
    ,---------------------------------,
    |                                 |
    |                                 |
    |     E  M  P  L  O  Y  E  E      |
    |                                 |
    |                                 |
    |     M   A   N   A   G   E   R   |
    |                                 |
    ,---------------------------------,
"#;

/// Drives the menu against a database, a prompter and an output sink.
pub struct Workflow<E, P, W> {
    db: E,
    prompter: P,
    out: W,
    show_banner: bool,
}

impl<E: Executor, P: Prompter, W: Write> Workflow<E, P, W> {
    pub fn new(db: E, prompter: P, out: W) -> Self {
        Workflow {
            db,
            prompter,
            out,
            show_banner: true,
        }
    }

    pub fn with_banner(mut self, show_banner: bool) -> Self {
        self.show_banner = show_banner;
        self
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (E, P, W) {
        (self.db, self.prompter, self.out)
    }

    /// Shows the menu until "Exit" is chosen or an action fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.show_banner {
                writeln!(self.out, "{}", BANNER)?;
            }
            let items = MenuAction::labels();
            let index = self.prompter.select("What would you like to do?", &items)?;
            let action = MenuAction::from_index(index).ok_or(TrackerError::InvalidSelection {
                index,
                len: items.len(),
            })?;
            info!(%action, "Menu action selected");

            if self.dispatch(action)? == LoopControl::Exit {
                return Ok(());
            }
        }
    }

    /// Runs one menu action.
    pub fn dispatch(&mut self, action: MenuAction) -> Result<LoopControl> {
        match action {
            MenuAction::ViewEmployees => self.show_employees()?,
            MenuAction::AddEmployee => self.add_employee()?,
            MenuAction::UpdateEmployeeRole => self.update_employee_role()?,
            MenuAction::ViewRoles => self.show_roles()?,
            MenuAction::AddRole => self.add_role()?,
            MenuAction::ViewDepartments => self.show_departments()?,
            MenuAction::AddDepartment => self.add_department()?,
            MenuAction::Exit => {
                self.db.close()?;
                return Ok(LoopControl::Exit);
            }
        }
        Ok(LoopControl::Continue)
    }

    pub fn show_departments(&mut self) -> Result<()> {
        let result = queries::list_departments(&mut self.db)?;
        self.print_table(&result)
    }

    pub fn show_roles(&mut self) -> Result<()> {
        let result = queries::list_roles(&mut self.db)?;
        self.print_table(&result)
    }

    pub fn show_employees(&mut self) -> Result<()> {
        let result = queries::list_employees(&mut self.db)?;
        self.print_table(&result)
    }

    pub fn add_department(&mut self) -> Result<()> {
        let name = self.prompter.input("Department name: ")?;

        queries::insert_department(&mut self.db, &name)?;
        info!(department = %name, "Added department");

        self.show_departments()?;
        writeln!(self.out, "New Department \"{}\" added!", name)?;
        Ok(())
    }

    pub fn add_role(&mut self) -> Result<()> {
        let departments = queries::department_choices(&mut self.db)?;
        if departments.is_empty() {
            writeln!(self.out, "No departments found. Add a department first.")?;
            return Ok(());
        }

        let title = self.prompter.input("Title: ")?;
        let salary = self.prompter.input_validated("Salary: ", validate_salary)?;
        let department = self.select_choice("Department: ", &departments)?;

        queries::insert_role(
            &mut self.db,
            &NewRole {
                title: title.clone(),
                salary,
                department_id: department.id,
            },
        )?;
        info!(role = %title, department_id = department.id, "Added role");

        self.show_roles()?;
        writeln!(
            self.out,
            "New Role \"{}\" was added into department {}!",
            title, department.label
        )?;
        Ok(())
    }

    pub fn add_employee(&mut self) -> Result<()> {
        let managers = queries::manager_choices(&mut self.db)?;
        let roles = queries::role_choices(&mut self.db)?;
        if roles.is_empty() {
            writeln!(self.out, "No roles found. Add a role first.")?;
            return Ok(());
        }

        let first_name = self.prompter.input("First Name: ")?;
        let last_name = self.prompter.input("Last Name: ")?;
        let role = self.select_choice("Role: ", &roles)?;
        let manager = self.select_manager("Manager: ", &managers)?;

        queries::insert_employee(
            &mut self.db,
            &NewEmployee {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                role_id: role.id,
                manager_id: manager_id(&manager),
            },
        )?;
        info!(role_id = role.id, manager_id = ?manager_id(&manager), "Added employee");

        self.show_employees()?;
        writeln!(self.out, "New Employee \"{}, {}\" added!", first_name, last_name)?;
        Ok(())
    }

    /// Reassigns an employee's role, and optionally their manager.
    ///
    /// When the manager is not reassigned the current one is looked up and
    /// written back unchanged.
    pub fn update_employee_role(&mut self) -> Result<()> {
        let employees = queries::employee_choices(&mut self.db)?;
        let roles = queries::role_choices(&mut self.db)?;
        if employees.is_empty() || roles.is_empty() {
            writeln!(self.out, "No employees or roles found.")?;
            return Ok(());
        }

        let employee = self.select_choice("Employee: ", &employees)?;
        let role = self.select_choice("New Role: ", &roles)?;
        let reassign = self.prompter.confirm("Also need to assign a new Manager?")?;

        let manager_id = if reassign {
            let managers = queries::manager_choices(&mut self.db)?;
            manager_id(&self.select_manager("Manager: ", &managers)?)
        } else {
            queries::find_manager_id(&mut self.db, employee.id)?
        };

        queries::update_employee(&mut self.db, employee.id, role.id, manager_id)?;
        info!(employee_id = employee.id, role_id = role.id, ?manager_id, "Updated employee");

        self.show_employees()?;
        writeln!(
            self.out,
            "The information for \"{}\" was saved correctly!",
            employee.label
        )?;
        Ok(())
    }

    fn select_choice(&mut self, message: &str, choices: &[Choice]) -> Result<Choice> {
        let items: Vec<String> = choices.iter().map(Choice::to_string).collect();
        let index = self.prompter.select(message, &items)?;
        choices.get(index).cloned().ok_or(TrackerError::InvalidSelection {
            index,
            len: items.len(),
        })
    }

    /// Offers `managers` followed by a "No Manager" entry.
    fn select_manager(&mut self, message: &str, managers: &[Choice]) -> Result<ManagerChoice> {
        let mut items: Vec<String> = managers.iter().map(Choice::to_string).collect();
        items.push(NO_MANAGER.to_string());

        let index = self.prompter.select(message, &items)?;
        if index == managers.len() {
            return Ok(None);
        }
        managers
            .get(index)
            .cloned()
            .map(Some)
            .ok_or(TrackerError::InvalidSelection {
                index,
                len: items.len(),
            })
    }

    fn print_table(&mut self, result: &QueryResult) -> Result<()> {
        writeln!(self.out, "{}", ResultsGrid::from_result(result).render())?;
        Ok(())
    }
}
