// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文，用于面向用户的诊断信息
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 界面语言（zh / en）对应的消息语言
pub fn locale_for_interface(interface_lang: &str) -> &'static str {
    match interface_lang.trim().to_lowercase().as_str() {
        "en" => "en",
        _ => "zh-CN",
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use uigf_export::i18n::t;
/// let msg = t("export.building");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use uigf_export::i18n::t_with_args;
/// let msg = t_with_args("export.name_not_found", &[("name", "胡桃")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
