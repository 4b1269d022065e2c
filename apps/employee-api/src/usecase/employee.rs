//! 社員 CRUD ユースケース

use std::sync::Arc;

use meibo_domain::employee::{Employee, EmployeeId, NewEmployee};
use meibo_infra::repository::EmployeeRepository;

use crate::error::ApiError;

/// 社員更新の入力
pub struct UpdateEmployeeInput {
   /// パスで指定された社員 ID
   pub id:               EmployeeId,
   /// ボディの `EmployeeID`（パスとの一致を検証する）
   pub body_employee_id: EmployeeId,
   /// 上書きする可変フィールド一式
   pub details:          NewEmployee,
}

/// 社員 CRUD ユースケース
pub struct EmployeeUseCaseImpl {
   employee_repository: Arc<dyn EmployeeRepository>,
}

impl EmployeeUseCaseImpl {
   pub fn new(employee_repository: Arc<dyn EmployeeRepository>) -> Self {
      Self {
         employee_repository,
      }
   }

   /// 社員を登録する
   ///
   /// 1. 挿入し、採番された ID を受け取る
   /// 2. 採番された ID でロール名付きの射影を読み直す
   ///
   /// 読み直しが空になるのは挿入と読み直しの間に行が消えた場合のみの
   /// 防御的ガードで、通常の条件下では到達しない。
   pub async fn create_employee(
      &self,
      details: NewEmployee,
   ) -> Result<(Employee, Option<String>), ApiError> {
      let id = self
         .employee_repository
         .insert(&details)
         .await
         .map_err(|e| ApiError::storage("Error adding employee", e))?;

      self
         .employee_repository
         .find_with_role_name(id)
         .await
         .map_err(|e| ApiError::storage("Error adding employee", e))?
         .ok_or_else(|| ApiError::NotFound("Employee not found after adding".to_string()))
   }

   /// 全社員をロール名付きで取得する（社員 ID 降順）
   pub async fn list_employees(&self) -> Result<Vec<(Employee, Option<String>)>, ApiError> {
      self
         .employee_repository
         .find_all_with_role_names()
         .await
         .map_err(|e| ApiError::storage("Error fetching employees", e))
   }

   /// 名前の部分一致で社員を検索する（射影なし、社員 ID 降順）
   pub async fn search_employees(&self, term: &str) -> Result<Vec<Employee>, ApiError> {
      self
         .employee_repository
         .search_by_name(term)
         .await
         .map_err(|e| ApiError::storage("Error searching employees", e))
   }

   /// 社員を削除する
   ///
   /// 存在しない ID は NotFound（冪等ではない）。
   pub async fn delete_employee(&self, id: EmployeeId) -> Result<(), ApiError> {
      let employee = self
         .employee_repository
         .find_by_id(id)
         .await
         .map_err(|e| ApiError::storage("Error deleting employee", e))?
         .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

      self
         .employee_repository
         .delete(employee.id())
         .await
         .map_err(|e| ApiError::storage("Error deleting employee", e))
   }

   /// 社員を更新する
   ///
   /// 1. パスの ID とボディの `EmployeeID` の一致を検証
   /// 2. 既存の行を取得（なければ NotFound）
   /// 3. 可変フィールドをすべて上書きして永続化
   /// 4. ロール名付きの射影を読み直す（空なら NotFound — 登録時と同じ
   ///    防御的ガード）
   pub async fn update_employee(
      &self,
      input: UpdateEmployeeInput,
   ) -> Result<(Employee, Option<String>), ApiError> {
      if input.id != input.body_employee_id {
         return Err(ApiError::BadRequest("Employee ID mismatch".to_string()));
      }

      let existing = self
         .employee_repository
         .find_by_id(input.id)
         .await
         .map_err(|e| ApiError::storage("Error updating employee", e))?
         .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

      let updated = existing.with_details(input.details);
      self
         .employee_repository
         .update(&updated)
         .await
         .map_err(|e| ApiError::storage("Error updating employee", e))?;

      self
         .employee_repository
         .find_with_role_name(input.id)
         .await
         .map_err(|e| ApiError::storage("Error updating employee", e))?
         .ok_or_else(|| ApiError::NotFound("Employee not found after update".to_string()))
   }
}

#[cfg(test)]
mod tests {
   use async_trait::async_trait;
   use chrono::{DateTime, Utc};
   use meibo_domain::role::{Role, RoleId};
   use meibo_infra::{InfraError, mock::MockEmployeeRepository};
   use pretty_assertions::assert_eq;

   use super::*;

   fn now() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   fn new_employee(first: &str, last: &str, role_id: Option<i32>) -> NewEmployee {
      NewEmployee {
         employee_number: 1001,
         first_name:      first.to_string(),
         last_name:       last.to_string(),
         date_joined:     now(),
         extension:       Some(204),
         role_id:         role_id.map(RoleId::from_i32),
      }
   }

   fn usecase_with_manager_role() -> (EmployeeUseCaseImpl, MockEmployeeRepository) {
      let repo = MockEmployeeRepository::new();
      repo.add_role(Role::from_db(RoleId::from_i32(1), "Manager".to_string()));
      let usecase = EmployeeUseCaseImpl::new(Arc::new(repo.clone()));
      (usecase, repo)
   }

   // ===== create_employee =====

   #[tokio::test]
   async fn test_登録後にロール名付きの射影を返す() {
      let (usecase, _repo) = usecase_with_manager_role();

      let (employee, role_name) = usecase
         .create_employee(new_employee("Ann", "Lee", Some(1)))
         .await
         .unwrap();

      assert_eq!(employee.first_name(), "Ann");
      assert_eq!(role_name, Some("Manager".to_string()));
   }

   #[tokio::test]
   async fn test_ロール未割り当てならロール名はnoneになる() {
      let (usecase, _repo) = usecase_with_manager_role();

      let (_, role_name) = usecase
         .create_employee(new_employee("Mia", "Kim", None))
         .await
         .unwrap();

      assert_eq!(role_name, None);
   }

   #[tokio::test]
   async fn test_存在しないロールidでもロール名がnoneになるだけでエラーにならない() {
      let (usecase, _repo) = usecase_with_manager_role();

      let (_, role_name) = usecase
         .create_employee(new_employee("Ann", "Lee", Some(99)))
         .await
         .unwrap();

      assert_eq!(role_name, None);
   }

   #[tokio::test]
   async fn test_登録直後の読み直しが空ならnot_foundを返す() {
      // 挿入は成功するが読み直しが常に空になるスタブで防御的ガードを通す
      struct VanishingRepository;

      #[async_trait]
      impl EmployeeRepository for VanishingRepository {
         async fn insert(&self, _employee: &NewEmployee) -> Result<EmployeeId, InfraError> {
            Ok(EmployeeId::from_i64(1))
         }

         async fn find_by_id(&self, _id: EmployeeId) -> Result<Option<Employee>, InfraError> {
            Ok(None)
         }

         async fn find_with_role_name(
            &self,
            _id: EmployeeId,
         ) -> Result<Option<(Employee, Option<String>)>, InfraError> {
            Ok(None)
         }

         async fn find_all_with_role_names(
            &self,
         ) -> Result<Vec<(Employee, Option<String>)>, InfraError> {
            Ok(Vec::new())
         }

         async fn search_by_name(&self, _term: &str) -> Result<Vec<Employee>, InfraError> {
            Ok(Vec::new())
         }

         async fn update(&self, _employee: &Employee) -> Result<(), InfraError> {
            Ok(())
         }

         async fn delete(&self, _id: EmployeeId) -> Result<(), InfraError> {
            Ok(())
         }
      }

      let usecase = EmployeeUseCaseImpl::new(Arc::new(VanishingRepository));

      let result = usecase.create_employee(new_employee("Ann", "Lee", None)).await;

      assert!(
         matches!(result, Err(ApiError::NotFound(ref msg)) if msg == "Employee not found after adding")
      );
   }

   // ===== list_employees =====

   #[tokio::test]
   async fn test_一覧は社員id降順で返る() {
      let (usecase, _repo) = usecase_with_manager_role();
      usecase
         .create_employee(new_employee("Ann", "Lee", Some(1)))
         .await
         .unwrap();
      usecase
         .create_employee(new_employee("Ben", "Sato", None))
         .await
         .unwrap();

      let employees = usecase.list_employees().await.unwrap();

      assert_eq!(employees.len(), 2);
      assert_eq!(employees[0].0.first_name(), "Ben");
      assert_eq!(employees[1].0.first_name(), "Ann");
      assert!(employees[0].0.id() > employees[1].0.id());
   }

   #[tokio::test]
   async fn test_一覧は各社員のロール名を解決する() {
      let (usecase, _repo) = usecase_with_manager_role();
      usecase
         .create_employee(new_employee("Ann", "Lee", Some(1)))
         .await
         .unwrap();
      usecase
         .create_employee(new_employee("Ben", "Sato", None))
         .await
         .unwrap();

      let employees = usecase.list_employees().await.unwrap();

      // 降順なので [0] が Ben（ロールなし）、[1] が Ann（Manager）
      assert_eq!(employees[0].1, None);
      assert_eq!(employees[1].1, Some("Manager".to_string()));
   }

   // ===== search_employees =====

   #[tokio::test]
   async fn test_検索は名と姓の部分一致で返す() {
      let (usecase, _repo) = usecase_with_manager_role();
      usecase
         .create_employee(new_employee("Ann", "Lee", None))
         .await
         .unwrap();
      usecase
         .create_employee(new_employee("Ben", "Sato", None))
         .await
         .unwrap();

      let by_first = usecase.search_employees("An").await.unwrap();
      assert_eq!(by_first.len(), 1);
      assert_eq!(by_first[0].first_name(), "Ann");

      let by_last = usecase.search_employees("Sat").await.unwrap();
      assert_eq!(by_last.len(), 1);
      assert_eq!(by_last[0].last_name(), "Sato");
   }

   #[tokio::test]
   async fn test_空文字列の検索は全件を返す() {
      let (usecase, _repo) = usecase_with_manager_role();
      usecase
         .create_employee(new_employee("Ann", "Lee", None))
         .await
         .unwrap();
      usecase
         .create_employee(new_employee("Ben", "Sato", None))
         .await
         .unwrap();

      let all = usecase.search_employees("").await.unwrap();

      assert_eq!(all.len(), 2);
   }

   #[tokio::test]
   async fn test_一致しない検索は空配列を返す() {
      let (usecase, _repo) = usecase_with_manager_role();
      usecase
         .create_employee(new_employee("Ann", "Lee", None))
         .await
         .unwrap();

      let none = usecase.search_employees("zzz").await.unwrap();

      assert!(none.is_empty());
   }

   // ===== delete_employee =====

   #[tokio::test]
   async fn test_削除後は一覧に現れない() {
      let (usecase, _repo) = usecase_with_manager_role();
      let (employee, _) = usecase
         .create_employee(new_employee("Ann", "Lee", None))
         .await
         .unwrap();

      usecase.delete_employee(employee.id()).await.unwrap();

      let employees = usecase.list_employees().await.unwrap();
      assert!(employees.iter().all(|(e, _)| e.id() != employee.id()));
   }

   #[tokio::test]
   async fn test_存在しないidの削除はnot_foundを返す() {
      let (usecase, _repo) = usecase_with_manager_role();

      let result = usecase.delete_employee(EmployeeId::from_i64(42)).await;

      assert!(matches!(result, Err(ApiError::NotFound(ref msg)) if msg == "Employee not found"));
   }

   // ===== update_employee =====

   #[tokio::test]
   async fn test_更新は可変フィールドをすべて上書きして射影を返す() {
      let (usecase, _repo) = usecase_with_manager_role();
      let (employee, _) = usecase
         .create_employee(new_employee("Ann", "Lee", None))
         .await
         .unwrap();

      let mut details = new_employee("Anne", "Leigh", Some(1));
      details.employee_number = 2002;
      details.extension = None;

      let (updated, role_name) = usecase
         .update_employee(UpdateEmployeeInput {
            id:               employee.id(),
            body_employee_id: employee.id(),
            details,
         })
         .await
         .unwrap();

      assert_eq!(updated.first_name(), "Anne");
      assert_eq!(updated.last_name(), "Leigh");
      assert_eq!(updated.employee_number(), 2002);
      assert_eq!(updated.extension(), None);
      assert_eq!(role_name, Some("Manager".to_string()));
   }

   #[tokio::test]
   async fn test_idミスマッチの更新はbad_requestを返し何も変更しない() {
      let (usecase, _repo) = usecase_with_manager_role();
      let (employee, _) = usecase
         .create_employee(new_employee("Ann", "Lee", None))
         .await
         .unwrap();

      let result = usecase
         .update_employee(UpdateEmployeeInput {
            id:               employee.id(),
            body_employee_id: EmployeeId::from_i64(999),
            details:          new_employee("Changed", "Changed", None),
         })
         .await;

      assert!(
         matches!(result, Err(ApiError::BadRequest(ref msg)) if msg == "Employee ID mismatch")
      );

      // 変更されていないこと
      let employees = usecase.list_employees().await.unwrap();
      assert_eq!(employees[0].0.first_name(), "Ann");
   }

   #[tokio::test]
   async fn test_存在しないidの更新はnot_foundを返す() {
      let (usecase, _repo) = usecase_with_manager_role();

      let result = usecase
         .update_employee(UpdateEmployeeInput {
            id:               EmployeeId::from_i64(42),
            body_employee_id: EmployeeId::from_i64(42),
            details:          new_employee("Ann", "Lee", None),
         })
         .await;

      assert!(matches!(result, Err(ApiError::NotFound(ref msg)) if msg == "Employee not found"));
   }

   // ===== ストレージ障害 =====

   #[tokio::test]
   async fn test_ストレージ障害はコンテキスト付きのstorageエラーになる() {
      struct FailingRepository;

      #[async_trait]
      impl EmployeeRepository for FailingRepository {
         async fn insert(&self, _employee: &NewEmployee) -> Result<EmployeeId, InfraError> {
            Err(InfraError::unexpected("connection refused"))
         }

         async fn find_by_id(&self, _id: EmployeeId) -> Result<Option<Employee>, InfraError> {
            Err(InfraError::unexpected("connection refused"))
         }

         async fn find_with_role_name(
            &self,
            _id: EmployeeId,
         ) -> Result<Option<(Employee, Option<String>)>, InfraError> {
            Err(InfraError::unexpected("connection refused"))
         }

         async fn find_all_with_role_names(
            &self,
         ) -> Result<Vec<(Employee, Option<String>)>, InfraError> {
            Err(InfraError::unexpected("connection refused"))
         }

         async fn search_by_name(&self, _term: &str) -> Result<Vec<Employee>, InfraError> {
            Err(InfraError::unexpected("connection refused"))
         }

         async fn update(&self, _employee: &Employee) -> Result<(), InfraError> {
            Err(InfraError::unexpected("connection refused"))
         }

         async fn delete(&self, _id: EmployeeId) -> Result<(), InfraError> {
            Err(InfraError::unexpected("connection refused"))
         }
      }

      let usecase = EmployeeUseCaseImpl::new(Arc::new(FailingRepository));

      let result = usecase.list_employees().await;

      assert!(matches!(
         result,
         Err(ApiError::Storage {
            context: "Error fetching employees",
            ..
         })
      ));
   }
}
