//! Representative stylesheets, one per built-in library.

pub(crate) const FONT_AWESOME_CSS: &str = r#"
/*!
 * Font Awesome Free 6.4.0 by @fontawesome - https://fontawesome.com
 */
.fa{font-family:var(--fa-style-family,"Font Awesome 6 Free")}
.fa-solid,.fas{font-weight:900}
.fa-spin{animation-name:fa-spin}
.fa-0:before{content:"\30"}
.fa-star:before{content:"\f005"}
.fa-heart:before{content:"\f004"}
.fa-solid.fa-house::before{content:"\f015"}
.fa-brands.fa-github:before{content:"\f09b"}
.fa-solid:before{content:var(--fa)}
@font-face{font-family:"Font Awesome 6 Free";src:url(../webfonts/fa-solid-900.woff2)}
"#;

pub(crate) const PHOSPHOR_CSS: &str = r#"
@font-face{font-family:"Phosphor";src:url("./Phosphor.woff2") format("woff2")}
.ph{font-family:"Phosphor"!important}
.ph.ph-heart:before{content:"\e2a8"}
.ph.ph-airplane:before{content:"\e002"}
.ph-bold.ph-bell::before{content:"\e0ce"}
.ph-bold:before{content:""}
"#;

pub(crate) const BOOTSTRAP_CSS: &str = r#"
@font-face{font-display:block;font-family:"bootstrap-icons";src:url("./fonts/bootstrap-icons.woff2")}
.bi::before,[class^="bi-"]::before{display:inline-block}
.bi-alarm-fill::before{content:"\f101"}
.bi-alarm::before{content:"\f102"}
"#;

pub(crate) const MDI_CSS: &str = r#"
@font-face{font-family:"Material Design Icons";src:url("../fonts/materialdesignicons-webfont.woff2")}
.mdi:before,.mdi-set{display:inline-block}
.mdi-account::before{content:"\F0004"}
.mdi-ab-testing::before{content:"\F01C9"}
.mdi-18px.mdi-set,.mdi-18px.mdi:before{font-size:18px}
"#;
