//! WiX source document template.
//!
//! Rendered with Handlebars by [`super::document`]. Values are XML-escaped by
//! the registered escape function; `hierarchy` is inserted raw because the
//! renderer escapes it while writing the nested directory elements.

pub const WXS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Wix xmlns="http://schemas.microsoft.com/wix/2006/wi">
  <Product Id="*"
           Name="{{product_name}}"
           Language="{{language}}"
           Version="{{version}}"
           Manufacturer="{{manufacturer}}"
           UpgradeCode="{{upgrade_code}}">
    <Package InstallerVersion="{{installer_version}}"
             Compressed="yes"
             InstallScope="{{install_scope}}"
             Platform="{{platform}}"
             Description="{{description}}"
             Manufacturer="{{manufacturer}}" />

    <MajorUpgrade DowngradeErrorMessage="A newer version of [ProductName] is already installed." />
    <MediaTemplate EmbedCab="yes" />
    {{#if homepage}}
    <Property Id="ARPURLINFOABOUT" Value="{{homepage}}" />
    {{/if}}

    <Directory Id="TARGETDIR" Name="SourceDir">
      <Directory Id="{{program_files_folder}}">
        <Directory Id="{{root_directory_id}}" Name="{{product_name}}">
{{{hierarchy}}}
        </Directory>
      </Directory>
      <Directory Id="ProgramMenuFolder">
        <Directory Id="{{programs_folder_id}}" Name="{{shortcut_folder}}">
          <Component Id="{{shortcut.component_id}}" Guid="{{shortcut.guid}}">
            <Shortcut Id="{{shortcut.id}}"
                      Name="{{product_name}}"
                      Description="{{description}}"
                      Target="[{{root_directory_id}}]{{exe}}"
                      WorkingDirectory="{{root_directory_id}}" />
            <RemoveFolder Id="{{programs_folder_id}}" On="uninstall" />
            <RegistryValue Root="HKCU"
                           Key="{{shortcut.registry_key}}"
                           Name="installed"
                           Type="integer"
                           Value="1"
                           KeyPath="yes" />
          </Component>
        </Directory>
      </Directory>
    </Directory>

    <Feature Id="MainApplication" Title="{{product_name}}" Level="1">
      {{#each component_refs}}
      <ComponentRef Id="{{this}}" />
      {{/each}}
    </Feature>
    {{#if ui}}

    <UIRef Id="WixUI_Minimal" />
    {{/if}}
  </Product>
</Wix>
"#;
