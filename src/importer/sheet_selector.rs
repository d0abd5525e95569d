// ==========================================
// RAB 导入引擎 - 工作表选择
// ==========================================
// 规则: 名称包含同义词（不区分大小写）的第一个工作表；否则取第一个工作表
// ==========================================

/// 从工作表名列表中选出要解析的工作表
///
/// 工作簿至少有一个工作表，空列表返回 `None`
pub fn select_sheet<'a, S: AsRef<str>>(sheet_names: &'a [String], synonyms: &[S]) -> Option<&'a str> {
    let matched = sheet_names.iter().find(|name| {
        let upper = name.to_uppercase();
        synonyms
            .iter()
            .any(|syn| !syn.as_ref().is_empty() && upper.contains(&syn.as_ref().to_uppercase()))
    });

    matched.or_else(|| sheet_names.first()).map(String::as_str)
}
