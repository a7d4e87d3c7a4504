// Main menu of the employee tracker.
//
// The menu lists eight actions in a fixed order. Each handler in the
// workflow reports back whether the loop should continue or stop.

use std::fmt;

/// The actions offered by the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewEmployees,
    AddEmployee,
    UpdateEmployeeRole,
    ViewRoles,
    AddRole,
    ViewDepartments,
    AddDepartment,
    Exit,
}

impl MenuAction {
    /// Menu entries in display order.
    pub const ALL: [MenuAction; 8] = [
        MenuAction::ViewEmployees,
        MenuAction::AddEmployee,
        MenuAction::UpdateEmployeeRole,
        MenuAction::ViewRoles,
        MenuAction::AddRole,
        MenuAction::ViewDepartments,
        MenuAction::AddDepartment,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ViewEmployees => "View All Employees",
            MenuAction::AddEmployee => "Add Employee",
            MenuAction::UpdateEmployeeRole => "Update Employee Role",
            MenuAction::ViewRoles => "View All Roles",
            MenuAction::AddRole => "Add Role",
            MenuAction::ViewDepartments => "View All Departments",
            MenuAction::AddDepartment => "Add Department",
            MenuAction::Exit => "Exit",
        }
    }

    /// Labels of [`MenuAction::ALL`], as handed to a select prompt.
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|a| a.label().to_string()).collect()
    }

    /// Action at a position returned by a select prompt.
    pub fn from_index(index: usize) -> Option<MenuAction> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the main loop does after an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}
