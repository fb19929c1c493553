//! 内存存储基础设施
//!
//! 进程内有序集合，重启后数据丢失。所有读改写都在同一次加锁内完成，
//! 多线程运行时下每个操作对调用方而言是原子的。

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::error::CoreError;

/// 可按字符串 id 检索的记录
pub trait Record: Clone + Send + 'static {
    fn id(&self) -> &str;
}

/// 按插入顺序保存记录的内存存储
#[derive(Clone)]
pub struct MemoryStore<T> {
    records: Arc<Mutex<Vec<T>>>,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<T>>, CoreError> {
        self.records
            .lock()
            .map_err(|e| CoreError::InternalServerError(format!("存储锁已损坏: {}", e)))
    }

    /// 读取全部记录（插入顺序）
    pub fn list(&self) -> Result<Vec<T>, CoreError> {
        Ok(self.lock()?.clone())
    }

    pub fn get(&self, id: &str) -> Result<Option<T>, CoreError> {
        Ok(self.lock()?.iter().find(|r| r.id() == id).cloned())
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        Ok(self.lock()?.len())
    }

    /// 追加到末尾
    pub fn insert(&self, record: T) -> Result<(), CoreError> {
        self.lock()?.push(record);
        Ok(())
    }

    /// 按下标替换，返回旧记录；下标越界返回 `None`
    pub fn replace_at(&self, index: usize, record: T) -> Result<Option<T>, CoreError> {
        Ok(replace_in(&mut self.lock()?, index, record))
    }

    /// 查找并替换，查找与写入在同一次加锁内完成
    ///
    /// `apply` 根据当前记录生成新记录；返回错误时存储保持不变。
    pub fn update<F>(&self, id: &str, apply: F) -> Result<Option<T>, CoreError>
    where
        F: FnOnce(&T) -> Result<T, CoreError>,
    {
        let mut records = self.lock()?;
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };

        let updated = apply(&records[index])?;
        replace_in(&mut records, index, updated.clone());
        Ok(Some(updated))
    }

    /// 按 id 删除，返回被删除的记录
    pub fn remove(&self, id: &str) -> Result<Option<T>, CoreError> {
        let mut records = self.lock()?;
        Ok(records
            .iter()
            .position(|r| r.id() == id)
            .map(|index| records.remove(index)))
    }
}

fn replace_in<T>(records: &mut [T], index: usize, record: T) -> Option<T> {
    records
        .get_mut(index)
        .map(|slot| std::mem::replace(slot, record))
}
