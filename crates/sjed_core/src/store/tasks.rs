//! Task mutations and counsel assignment.

use super::{new_id, CaseStore, StoreResult};
use crate::model::{Counsel, Entity, NewTask, Task, TaskPatch, TaskStatus};
use crate::persist::BlobStore;
use log::{info, warn};

impl<B: BlobStore> CaseStore<B> {
    /// Creates a task with a fresh id and `createdAt = updatedAt = now`.
    pub fn add_task(&mut self, task: NewTask) -> StoreResult<Task> {
        let now = self.clock.now();
        self.insert(task.into_task(new_id::<Task>(), now))
    }

    /// Merges `patch` into task `id`. Unknown ids are a no-op returning `Ok(false)`.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> StoreResult<bool> {
        self.patch::<Task>(id, |task| patch.apply_to(task))
    }

    /// Moves a task to another kanban column. Every transition is allowed.
    pub fn update_task_status(&mut self, id: &str, status: TaskStatus) -> StoreResult<bool> {
        self.update_task(id, TaskPatch::status(status))
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        self.remove::<Task>(id)
    }

    /// Assigns a task to counsel, updating both records in one write.
    ///
    /// Sets the task's `assignedCounselId` and appends the task id to the
    /// counsel's `tasksAssigned` unless it is already there. Returns `false`
    /// and changes nothing when either id is unknown. A previous assignee
    /// keeps its `tasksAssigned` entry.
    pub fn assign_task_to_counsel(&mut self, task_id: &str, counsel_id: &str) -> bool {
        let now = self.clock.now();
        let data = &mut self.data;
        let task_index = data.tasks.iter().position(|task| task.id == task_id);
        let counsel_index = data
            .counsel
            .iter()
            .position(|counsel| counsel.id == counsel_id);

        let (Some(task_index), Some(counsel_index)) = (task_index, counsel_index) else {
            warn!(
                "event=task_assign module=store status=not_found task_id={} counsel_id={}",
                task_id, counsel_id
            );
            return false;
        };

        let task = &mut data.tasks[task_index];
        task.assigned_counsel_id = Some(counsel_id.to_string());
        task.touch(now);

        let counsel: &mut Counsel = &mut data.counsel[counsel_index];
        let appended = counsel.assign_task(task_id);
        counsel.touch(now);

        info!(
            "event=task_assign module=store status=ok task_id={} counsel_id={} appended={}",
            task_id, counsel_id, appended
        );
        self.write_through();
        true
    }
}
