// ==========================================
// DAWA 地址导入 - 导入迭代器
// ==========================================
// 模型: 单生产者（后台线程）/ 单消费者，经有界 FIFO 通道交接
// 状态: Open → Exhausted（终止后每次调用都返回同一结果）
// 取消: CancelHandle 置位停止标志；cancel()/Drop 同时关闭通道，
//       唤醒阻塞在满通道上的生产者
// 限制: 阻塞在底层 I/O 读取上的生产者要等到读取返回后才能退出
// ==========================================

use crate::domain::Address;
use crate::importer::error::{ImportError, ImportResult};
use futures::Stream;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// 通道默认容量（条记录）
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

// ==========================================
// CancelHandle - 取消句柄
// ==========================================
/// 可跨线程克隆，用于在消费端之外请求停止导入
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

// ==========================================
// RecordSink - 生产端
// ==========================================
pub(crate) struct RecordSink {
    tx: mpsc::Sender<ImportResult<Address>>,
    cancel: CancelHandle,
}

impl RecordSink {
    /// 推送一条完整记录；通道满时阻塞，消费端关闭或已取消时返回 Cancelled
    pub(crate) fn push(&self, address: Address) -> ImportResult<()> {
        if self.cancel.is_cancelled() {
            return Err(ImportError::Cancelled);
        }
        self.tx
            .blocking_send(Ok(address))
            .map_err(|_| ImportError::Cancelled)
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.tx.is_closed()
    }
}

#[derive(Debug)]
enum IterState {
    Open,
    Exhausted(Option<ImportError>), // None = 数据已读完
}

// ==========================================
// AddressIter - 拉取式迭代器
// ==========================================
pub struct AddressIter {
    rx: mpsc::Receiver<ImportResult<Address>>,
    state: IterState,
    cancel: CancelHandle,
    panicked: Arc<AtomicBool>, // 生产线程 panic 时在释放发送端之前置位
}

impl fmt::Debug for AddressIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressIter")
            .field("state", &self.state)
            .field("exhausted", &self.is_exhausted())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl AddressIter {
    /// 启动后台生产线程
    ///
    /// producer 返回的第一个错误会被发送到通道并终止导入；
    /// 返回 Cancelled 时静默退出。
    pub(crate) fn spawn<F>(name: &str, capacity: usize, producer: F) -> ImportResult<Self>
    where
        F: FnOnce(&RecordSink) -> ImportResult<()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let cancel = CancelHandle::default();
        let sink = RecordSink {
            tx,
            cancel: cancel.clone(),
        };

        let panicked = Arc::new(AtomicBool::new(false));
        let panic_flag = panicked.clone();

        // 线程不 join：通道关闭即表示生产端已结束
        std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                match panic::catch_unwind(AssertUnwindSafe(|| producer(&sink))) {
                    Ok(Ok(())) => debug!("导入线程正常结束"),
                    Ok(Err(ImportError::Cancelled)) => debug!("导入线程已取消"),
                    Ok(Err(e)) => {
                        warn!(error = %e, "导入终止");
                        if sink.tx.blocking_send(Err(e)).is_err() {
                            debug!("消费端已关闭，丢弃终止错误");
                        }
                    }
                    Err(_) => {
                        panic_flag.store(true, Ordering::SeqCst);
                        warn!("导入线程 panic");
                    }
                }
                drop(sink);
            })
            .map_err(|e| ImportError::InternalError(format!("无法启动导入线程: {}", e)))?;

        Ok(Self {
            rx,
            state: IterState::Open,
            cancel,
            panicked,
        })
    }

    /// 取下一条记录（阻塞）
    ///
    /// # 返回
    /// - Ok(Some(address)): 下一条记录
    /// - Ok(None): 数据已读完
    /// - Err: 导入终止的原因
    ///
    /// 终止后的每次调用返回同一结果。不能在异步运行时内调用，请改用 `next_async`。
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> ImportResult<Option<Address>> {
        if let Some(outcome) = self.terminal() {
            return outcome;
        }
        let received = self.rx.blocking_recv();
        self.settle(received)
    }

    /// `next` 的异步版本
    pub async fn next_async(&mut self) -> ImportResult<Option<Address>> {
        if let Some(outcome) = self.terminal() {
            return outcome;
        }
        let received = self.rx.recv().await;
        self.settle(received)
    }

    /// 停止导入：丢弃尚未取出的记录，之后 `next` 始终返回 Cancelled
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.rx.close();
        if matches!(self.state, IterState::Open) {
            self.state = IterState::Exhausted(Some(ImportError::Cancelled));
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, IterState::Exhausted(_))
    }

    /// 标准迭代器适配：依次产出记录，终止错误只产出一次
    pub fn records(self) -> Records {
        Records {
            iter: self,
            done: false,
        }
    }

    /// 异步流适配，语义同 `records`
    pub fn into_stream(self) -> impl Stream<Item = ImportResult<Address>> {
        futures::stream::unfold(Some(self), |state| async move {
            let mut iter = state?;
            match iter.next_async().await {
                Ok(Some(address)) => Some((Ok(address), Some(iter))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    fn terminal(&self) -> Option<ImportResult<Option<Address>>> {
        match &self.state {
            IterState::Open => None,
            IterState::Exhausted(None) => Some(Ok(None)),
            IterState::Exhausted(Some(e)) => Some(Err(e.clone())),
        }
    }

    fn settle(
        &mut self,
        received: Option<ImportResult<Address>>,
    ) -> ImportResult<Option<Address>> {
        match received {
            Some(Ok(address)) => Ok(Some(address)),
            Some(Err(e)) => {
                self.state = IterState::Exhausted(Some(e.clone()));
                Err(e)
            }
            None => {
                // 通道关闭且无终止错误：正常结束、被取消或线程 panic
                let outcome = self.closed_outcome();
                self.state = IterState::Exhausted(outcome.clone());
                match outcome {
                    None => Ok(None),
                    Some(e) => Err(e),
                }
            }
        }
    }

    /// 通道关闭后的终止原因（不阻塞，可在异步上下文调用）
    fn closed_outcome(&self) -> Option<ImportError> {
        if self.panicked.load(Ordering::SeqCst) {
            return Some(ImportError::WorkerPanicked);
        }
        if self.cancel.is_cancelled() {
            return Some(ImportError::Cancelled);
        }
        None
    }
}

impl Drop for AddressIter {
    fn drop(&mut self) {
        // 接收端随之释放，阻塞中的生产者会被唤醒并退出
        self.cancel.cancel();
    }
}

// ==========================================
// Records - 标准迭代器适配器
// ==========================================
pub struct Records {
    iter: AddressIter,
    done: bool,
}

impl Iterator for Records {
    type Item = ImportResult<Address>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.iter.next() {
            Ok(Some(address)) => Some(Ok(address)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
