/// 动作合法性
pub mod action_mask;
