use super::util::downcast;
use crate::application_port::EmployeeError;
use crate::domain_model::{Address, Employee, EmployeeId, EmployeeInput};
use crate::domain_port::{EmployeeRepo, StorageTx};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlEmployeeRepo {
    pool: MySqlPool,
}

impl MySqlEmployeeRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlEmployeeRepo { pool }
    }

    fn row_to_employee(row: MySqlRow) -> Result<Employee, EmployeeError> {
        let phone_json: String = row
            .try_get("phone")
            .map_err(|e| EmployeeError::Store(e.to_string()))?;
        let phone: Vec<String> = serde_json::from_str(&phone_json)
            .map_err(|e| EmployeeError::Store(format!("phone column: {e}")))?;

        Ok(Employee {
            id: row
                .try_get("employee_id")
                .map_err(|e| EmployeeError::Store(e.to_string()))?,
            name: row
                .try_get("name")
                .map_err(|e| EmployeeError::Store(e.to_string()))?,
            phone,
            company: row
                .try_get("company")
                .map_err(|e| EmployeeError::Store(e.to_string()))?,
            role: row
                .try_get("role")
                .map_err(|e| EmployeeError::Store(e.to_string()))?,
            active: row
                .try_get("is_active")
                .map_err(|e| EmployeeError::Store(e.to_string()))?,
            address: Address {
                add_line: row
                    .try_get("add_line")
                    .map_err(|e| EmployeeError::Store(e.to_string()))?,
                state: row
                    .try_get("state")
                    .map_err(|e| EmployeeError::Store(e.to_string()))?,
                hometown: row
                    .try_get("hometown")
                    .map_err(|e| EmployeeError::Store(e.to_string()))?,
                pincode: row
                    .try_get("pincode")
                    .map_err(|e| EmployeeError::Store(e.to_string()))?,
            },
        })
    }

    fn phone_json(input: &EmployeeInput) -> Result<String, EmployeeError> {
        serde_json::to_string(&input.phone).map_err(|e| EmployeeError::Store(e.to_string()))
    }
}

const SELECT_EMPLOYEE: &str = r#"
SELECT e.employee_id, e.name, e.phone, e.company, e.role, e.is_active,
       a.add_line, a.state, a.hometown, a.pincode
FROM employee e
JOIN address a ON a.address_id = e.address_id
WHERE e.is_deleted = 0
"#;

#[async_trait::async_trait]
impl EmployeeRepo for MySqlEmployeeRepo {
    async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        let rows = sqlx::query(&format!("{SELECT_EMPLOYEE} ORDER BY e.employee_id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_employee).collect()
    }

    async fn find(&self, id: EmployeeId) -> Result<Option<Employee>, EmployeeError> {
        let row = sqlx::query(&format!("{SELECT_EMPLOYEE} AND e.employee_id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| EmployeeError::Store(e.to_string()))?;

        row.map(Self::row_to_employee).transpose()
    }

    async fn name_exists(
        &self,
        name: &str,
        exclude: Option<EmployeeId>,
    ) -> Result<bool, EmployeeError> {
        let count: i64 = match exclude {
            Some(id) => sqlx::query_scalar(
                r#"
SELECT COUNT(*) FROM employee
WHERE LOWER(name) = LOWER(?) AND is_deleted = 0 AND employee_id <> ?
"#,
            )
            .bind(name)
            .bind(id)
            .fetch_one(&self.pool)
            .await,
            None => sqlx::query_scalar(
                r#"
SELECT COUNT(*) FROM employee
WHERE LOWER(name) = LOWER(?) AND is_deleted = 0
"#,
            )
            .bind(name)
            .fetch_one(&self.pool)
            .await,
        }
        .map_err(|e| EmployeeError::Store(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        input: &EmployeeInput,
    ) -> Result<EmployeeId, EmployeeError> {
        let phone = Self::phone_json(input)?;
        let tx = downcast(tx);

        let address_id = sqlx::query(
            r#"
INSERT INTO address (add_line, state, hometown, pincode)
VALUES (?, ?, ?, ?)
"#,
        )
        .bind(&input.address.add_line)
        .bind(&input.address.state)
        .bind(&input.address.hometown)
        .bind(&input.address.pincode)
        .execute(tx.conn())
        .await
        .map_err(|e| EmployeeError::Store(e.to_string()))?
        .last_insert_id();

        let employee_id = sqlx::query(
            r#"
INSERT INTO employee (name, phone, company, role, is_active, address_id)
VALUES (?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(&input.name)
        .bind(&phone)
        .bind(&input.company)
        .bind(&input.role)
        .bind(input.active)
        .bind(address_id)
        .execute(tx.conn())
        .await
        .map_err(|e| EmployeeError::Store(e.to_string()))?
        .last_insert_id();

        Ok(EmployeeId(employee_id))
    }

    async fn update_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        id: EmployeeId,
        input: &EmployeeInput,
    ) -> Result<(), EmployeeError> {
        let phone = Self::phone_json(input)?;
        let tx = downcast(tx);

        let updated = sqlx::query(
            r#"
UPDATE employee
SET name = ?, phone = ?, company = ?, role = ?, is_active = ?
WHERE employee_id = ? AND is_deleted = 0
"#,
        )
        .bind(&input.name)
        .bind(&phone)
        .bind(&input.company)
        .bind(&input.role)
        .bind(input.active)
        .bind(id)
        .execute(tx.conn())
        .await
        .map_err(|e| EmployeeError::Store(e.to_string()))?
        .rows_affected();

        if updated == 0 {
            return Err(EmployeeError::NotFound);
        }

        sqlx::query(
            r#"
UPDATE address a
JOIN employee e ON e.address_id = a.address_id
SET a.add_line = ?, a.state = ?, a.hometown = ?, a.pincode = ?
WHERE e.employee_id = ?
"#,
        )
        .bind(&input.address.add_line)
        .bind(&input.address.state)
        .bind(&input.address.hometown)
        .bind(&input.address.pincode)
        .bind(id)
        .execute(tx.conn())
        .await
        .map_err(|e| EmployeeError::Store(e.to_string()))?;

        Ok(())
    }

    async fn soft_delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        id: EmployeeId,
    ) -> Result<(), EmployeeError> {
        let tx = downcast(tx);

        sqlx::query(
            r#"
UPDATE address a
JOIN employee e ON e.address_id = a.address_id
SET a.is_deleted = 1
WHERE e.employee_id = ?
"#,
        )
        .bind(id)
        .execute(tx.conn())
        .await
        .map_err(|e| EmployeeError::Store(e.to_string()))?;

        let deleted = sqlx::query(
            r#"
UPDATE employee SET is_deleted = 1 WHERE employee_id = ? AND is_deleted = 0
"#,
        )
        .bind(id)
        .execute(tx.conn())
        .await
        .map_err(|e| EmployeeError::Store(e.to_string()))?
        .rows_affected();

        if deleted == 0 {
            return Err(EmployeeError::NotFound);
        }
        Ok(())
    }
}
