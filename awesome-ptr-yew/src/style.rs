//! Default stylesheet for the indicator

/// `transition-enabled`, `spin` and `bump` are toggled by the host
pub const STYLESHEET: &str = r#"
.react-awesome-ptr {
  position: absolute;
  left: 0;
  right: 0;
  display: flex;
  justify-content: center;
  overflow: hidden;
  opacity: 0;
  pointer-events: none;
}
.react-awesome-ptr.transition-enabled {
  transition: opacity 0.25s cubic-bezier(0, 0, 0, 1);
}
.react-awesome-ptr-spinner .spinner-image,
.rap-cupertino-spinner > div {
  width: 100%;
  height: 100%;
}
.react-awesome-ptr .bump {
  animation: rap-bump 0.2s cubic-bezier(0, 0, 0, 1);
}
.react-awesome-ptr .spin {
  animation: rap-spin 0.8s linear infinite;
}
.rap-cupertino-spinner .spin {
  animation: rap-spin 0.8s steps(8) infinite;
}
@keyframes rap-spin {
  from { transform: rotate(0deg); }
  to { transform: rotate(360deg); }
}
@keyframes rap-bump {
  50% { scale: 1.2; }
}
"#;
