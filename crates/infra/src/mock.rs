//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! meibo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use meibo_domain::{
   employee::{Employee, EmployeeId, NewEmployee},
   role::{Role, RoleId},
};

use crate::{
   error::InfraError,
   repository::{EmployeeRepository, RoleRepository},
};

// ===== MockEmployeeRepository =====

/// インメモリ実装の EmployeeRepository
///
/// ID は 1 から順に採番する。ロール名の射影（LEFT JOIN 相当）のため、
/// [`add_role`](MockEmployeeRepository::add_role) で参照用ロールを登録できる。
#[derive(Clone)]
pub struct MockEmployeeRepository {
   employees: Arc<Mutex<Vec<Employee>>>,
   roles:     Arc<Mutex<Vec<Role>>>,
   next_id:   Arc<Mutex<i64>>,
}

impl MockEmployeeRepository {
   pub fn new() -> Self {
      Self {
         employees: Arc::new(Mutex::new(Vec::new())),
         roles:     Arc::new(Mutex::new(Vec::new())),
         next_id:   Arc::new(Mutex::new(1)),
      }
   }

   /// ロール名解決用の参照データを登録する
   pub fn add_role(&self, role: Role) {
      self.roles.lock().unwrap().push(role);
   }

   fn role_name_of(&self, role_id: Option<RoleId>) -> Option<String> {
      let role_id = role_id?;
      self
         .roles
         .lock()
         .unwrap()
         .iter()
         .find(|r| r.id() == role_id)
         .map(|r| r.name().to_string())
   }
}

impl Default for MockEmployeeRepository {
   fn default() -> Self {
      Self::new()
   }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
   async fn insert(&self, employee: &NewEmployee) -> Result<EmployeeId, InfraError> {
      let mut next_id = self.next_id.lock().unwrap();
      let id = EmployeeId::from_i64(*next_id);
      *next_id += 1;

      self
         .employees
         .lock()
         .unwrap()
         .push(Employee::from_db(id, employee.clone()));
      Ok(id)
   }

   async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
      Ok(self
         .employees
         .lock()
         .unwrap()
         .iter()
         .find(|e| e.id() == id)
         .cloned())
   }

   async fn find_with_role_name(
      &self,
      id: EmployeeId,
   ) -> Result<Option<(Employee, Option<String>)>, InfraError> {
      let employee = self
         .employees
         .lock()
         .unwrap()
         .iter()
         .find(|e| e.id() == id)
         .cloned();

      Ok(employee.map(|e| {
         let role_name = self.role_name_of(e.role_id());
         (e, role_name)
      }))
   }

   async fn find_all_with_role_names(
      &self,
   ) -> Result<Vec<(Employee, Option<String>)>, InfraError> {
      let mut employees = self.employees.lock().unwrap().clone();
      employees.sort_by(|a, b| b.id().cmp(&a.id()));

      Ok(employees
         .into_iter()
         .map(|e| {
            let role_name = self.role_name_of(e.role_id());
            (e, role_name)
         })
         .collect())
   }

   async fn search_by_name(&self, term: &str) -> Result<Vec<Employee>, InfraError> {
      let mut matches: Vec<Employee> = self
         .employees
         .lock()
         .unwrap()
         .iter()
         .filter(|e| e.first_name().contains(term) || e.last_name().contains(term))
         .cloned()
         .collect();
      matches.sort_by(|a, b| b.id().cmp(&a.id()));

      Ok(matches)
   }

   async fn update(&self, employee: &Employee) -> Result<(), InfraError> {
      let mut employees = self.employees.lock().unwrap();
      // 対象行が存在しない場合は 0 行更新（Postgres の UPDATE と同じ挙動）
      if let Some(pos) = employees.iter().position(|e| e.id() == employee.id()) {
         employees[pos] = employee.clone();
      }
      Ok(())
   }

   async fn delete(&self, id: EmployeeId) -> Result<(), InfraError> {
      self.employees.lock().unwrap().retain(|e| e.id() != id);
      Ok(())
   }
}

// ===== MockRoleRepository =====

/// インメモリ実装の RoleRepository
#[derive(Clone, Default)]
pub struct MockRoleRepository {
   roles: Arc<Mutex<Vec<Role>>>,
}

impl MockRoleRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add_role(&self, role: Role) {
      self.roles.lock().unwrap().push(role);
   }
}

#[async_trait]
impl RoleRepository for MockRoleRepository {
   async fn find_all(&self) -> Result<Vec<Role>, InfraError> {
      Ok(self.roles.lock().unwrap().clone())
   }
}
