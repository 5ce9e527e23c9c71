//! 批量操作抽象 Trait

use std::fmt;

use async_trait::async_trait;

/// 对单个条目执行的远端操作
///
/// 实现方:
/// - Cloudflare: 创建 / 删除 A 记录
/// - Namecheap: SSL 证书到期检查
/// - OVH: NetApp 共享 ACL 授权
/// - Zabbix: 按主机名删除主机
///
/// 同一实例会被多个条目并发调用，实现不得在条目之间共享可变状态。
#[async_trait]
pub trait BatchOperation: Send + Sync {
    /// 条目类型
    type Item: Send;
    /// 成功时的详情
    type Output: Send;
    /// 失败原因，最终以 `Display` 文本进入报告
    type Error: fmt::Display + Send;

    /// 操作名称（用于日志）
    fn name(&self) -> &str;

    /// 执行一次操作
    ///
    /// # Arguments
    /// * `item` - 待处理条目
    async fn execute(&self, item: Self::Item) -> Result<Self::Output, Self::Error>;
}
