use super::util::downcast;
use crate::application_port::ProjectError;
use crate::domain_model::{
    EmployeeId, Project, ProjectCounts, ProjectId, ProjectInput, ProjectStatus,
};
use crate::domain_port::{ProjectRepo, StorageTx};
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlProjectRepo {
    pool: MySqlPool,
}

impl MySqlProjectRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlProjectRepo { pool }
    }

    fn row_to_project(row: MySqlRow) -> Result<Project, ProjectError> {
        let status: String = row
            .try_get("status")
            .map_err(|e| ProjectError::Store(e.to_string()))?;
        let status: ProjectStatus = status
            .parse()
            .map_err(|e: String| ProjectError::Store(e))?;

        let start_date: DateTime<Utc> = row
            .try_get("start_date")
            .map_err(|e| ProjectError::Store(e.to_string()))?;
        let end_date: DateTime<Utc> = row
            .try_get("end_date")
            .map_err(|e| ProjectError::Store(e.to_string()))?;

        Ok(Project {
            id: row
                .try_get("project_id")
                .map_err(|e| ProjectError::Store(e.to_string()))?,
            title: row
                .try_get("title")
                .map_err(|e| ProjectError::Store(e.to_string()))?,
            description: row
                .try_get("description")
                .map_err(|e| ProjectError::Store(e.to_string()))?,
            start_date,
            end_date,
            duration_days: row
                .try_get("duration_days")
                .map_err(|e| ProjectError::Store(e.to_string()))?,
            employee_id: row
                .try_get("employee_id")
                .map_err(|e| ProjectError::Store(e.to_string()))?,
            status,
        })
    }
}

const SELECT_PROJECT: &str = r#"
SELECT project_id, title, description, start_date, end_date,
       duration_days, employee_id, status
FROM project
WHERE is_deleted = 0
"#;

#[async_trait::async_trait]
impl ProjectRepo for MySqlProjectRepo {
    async fn list(&self) -> Result<Vec<Project>, ProjectError> {
        let rows = sqlx::query(&format!("{SELECT_PROJECT} ORDER BY project_id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ProjectError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_project).collect()
    }

    async fn find(&self, id: ProjectId) -> Result<Option<Project>, ProjectError> {
        let row = sqlx::query(&format!("{SELECT_PROJECT} AND project_id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ProjectError::Store(e.to_string()))?;

        row.map(Self::row_to_project).transpose()
    }

    async fn title_exists(
        &self,
        title: &str,
        exclude: Option<ProjectId>,
    ) -> Result<bool, ProjectError> {
        let count: i64 = match exclude {
            Some(id) => sqlx::query_scalar(
                r#"
SELECT COUNT(*) FROM project
WHERE LOWER(title) = LOWER(?) AND is_deleted = 0 AND project_id <> ?
"#,
            )
            .bind(title)
            .bind(id)
            .fetch_one(&self.pool)
            .await,
            None => sqlx::query_scalar(
                r#"
SELECT COUNT(*) FROM project
WHERE LOWER(title) = LOWER(?) AND is_deleted = 0
"#,
            )
            .bind(title)
            .fetch_one(&self.pool)
            .await,
        }
        .map_err(|e| ProjectError::Store(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create(
        &self,
        input: &ProjectInput,
        duration_days: i64,
    ) -> Result<ProjectId, ProjectError> {
        let project_id = sqlx::query(
            r#"
INSERT INTO project (title, description, start_date, end_date,
                     duration_days, employee_id, status)
VALUES (?, ?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(duration_days)
        .bind(input.employee_id)
        .bind(input.status.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectError::Store(e.to_string()))?
        .last_insert_id();

        Ok(ProjectId(project_id))
    }

    async fn update(
        &self,
        id: ProjectId,
        input: &ProjectInput,
        duration_days: i64,
    ) -> Result<(), ProjectError> {
        let updated = sqlx::query(
            r#"
UPDATE project
SET title = ?, description = ?, start_date = ?, end_date = ?,
    duration_days = ?, employee_id = ?, status = ?
WHERE project_id = ? AND is_deleted = 0
"#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(duration_days)
        .bind(input.employee_id)
        .bind(input.status.to_string())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectError::Store(e.to_string()))?
        .rows_affected();

        if updated == 0 {
            return Err(ProjectError::NotFound);
        }
        Ok(())
    }

    async fn soft_delete(&self, id: ProjectId) -> Result<(), ProjectError> {
        let deleted = sqlx::query(
            r#"
UPDATE project SET is_deleted = 1 WHERE project_id = ? AND is_deleted = 0
"#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectError::Store(e.to_string()))?
        .rows_affected();

        if deleted == 0 {
            return Err(ProjectError::NotFound);
        }
        Ok(())
    }

    async fn counts_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<ProjectCounts, ProjectError> {
        let row = sqlx::query(
            r#"
SELECT COUNT(*) AS total,
       CAST(COALESCE(SUM(status = 'Ongoing'), 0) AS SIGNED) AS ongoing,
       CAST(COALESCE(SUM(status = 'Done'), 0) AS SIGNED) AS completed
FROM project
WHERE employee_id = ? AND is_deleted = 0
"#,
        )
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ProjectError::Store(e.to_string()))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| ProjectError::Store(e.to_string()))?;
        let ongoing: i64 = row
            .try_get("ongoing")
            .map_err(|e| ProjectError::Store(e.to_string()))?;
        let completed: i64 = row
            .try_get("completed")
            .map_err(|e| ProjectError::Store(e.to_string()))?;

        Ok(ProjectCounts {
            total: total as u64,
            ongoing: ongoing as u64,
            completed: completed as u64,
        })
    }

    async fn soft_delete_by_employee_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        employee_id: EmployeeId,
    ) -> Result<(), ProjectError> {
        let tx = downcast(tx);

        sqlx::query(
            r#"
UPDATE project SET is_deleted = 1 WHERE employee_id = ? AND is_deleted = 0
"#,
        )
        .bind(employee_id)
        .execute(tx.conn())
        .await
        .map_err(|e| ProjectError::Store(e.to_string()))?;

        Ok(())
    }
}
